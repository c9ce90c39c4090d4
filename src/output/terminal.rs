// Colored terminal output for feeds, recommendations, and interests.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use std::collections::BTreeSet;

use colored::Colorize;

use crate::ranking::results::{
    GroupRecommendation, RecommendationType, ScoredPost, UserRecommendation,
};
use crate::topics::interests::InterestProfile;

/// Display a ranked post list in the terminal.
pub fn display_posts(title: &str, posts: &[ScoredPost], first_rank: usize) {
    if posts.is_empty() {
        println!("No posts to show.");
        return;
    }

    println!("\n{}", format!("=== {title} ({} posts) ===", posts.len()).bold());
    println!();

    println!(
        "  {:>4}  {:>8}  {:>7}  {:>6}  {:<24}  {}",
        "Rank".dimmed(),
        "Post".dimmed(),
        "Score".dimmed(),
        "Author".dimmed(),
        "Topics".dimmed(),
        "Engagement".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, scored) in posts.iter().enumerate() {
        let post = &scored.post;
        let topics = join_topics(&post.topics);
        println!(
            "  {:>4}. {:>8}  {:>7.2}  {:>6}  {:<24}  {}L {}C {}S",
            first_rank + i + 1,
            post.id,
            scored.score,
            post.author_id,
            super::truncate_chars(&topics, 24),
            post.like_count,
            post.comment_count,
            post.share_count,
        );
        if let Some(reason) = &scored.reason {
            println!("         {}", reason.dimmed());
        }
    }
    println!();
}

/// Display user recommendations with their reasons.
pub fn display_users(recommendations: &[UserRecommendation]) {
    if recommendations.is_empty() {
        println!("No user recommendations yet. More activity means better suggestions.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Suggested Users ({}) ===", recommendations.len()).bold()
    );
    println!();

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {:>3}. @{:<24} {:<28} {}",
            i + 1,
            super::truncate_chars(&rec.user.username, 24),
            colorize_type(rec.recommendation_type),
            rec.reason.dimmed(),
        );
        if !rec.common_topics.is_empty() {
            println!("       topics: {}", join_topics(&rec.common_topics));
        }
    }
    println!();
}

/// Display group recommendations with their reasons.
pub fn display_groups(recommendations: &[GroupRecommendation]) {
    if recommendations.is_empty() {
        println!("No group recommendations right now.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Suggested Groups ({}) ===", recommendations.len()).bold()
    );
    println!();

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {:>3}. {:<28} {:<18} {:>5} members  {}",
            i + 1,
            super::truncate_chars(&rec.group.name, 28),
            colorize_type(rec.recommendation_type),
            rec.member_count,
            rec.reason.dimmed(),
        );
    }
    println!();
}

/// Display the three interest subsets side by side.
pub fn display_interests(user_id: i64, profile: &InterestProfile) {
    println!("\n{}", format!("=== Interests for user {user_id} ===").bold());
    println!();
    print_topic_line("Authored", &profile.authored);
    print_topic_line("Interacted", &profile.interacted);
    print_topic_line("Friends", &profile.friends);
    println!();
}

fn print_topic_line(label: &str, topics: &BTreeSet<String>) {
    let shown = if topics.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        join_topics(topics)
    };
    println!("  {:<11} {}", format!("{label}:").bold(), shown);
}

fn join_topics(topics: &BTreeSet<String>) -> String {
    topics.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

/// Colorize a recommendation type tag.
fn colorize_type(kind: RecommendationType) -> colored::ColoredString {
    let tag = kind.as_str();
    match kind {
        RecommendationType::InterestBased => tag.green(),
        RecommendationType::MutualFriendsBased | RecommendationType::MutualFriends => tag.cyan(),
        RecommendationType::RecentInteractionsBased => tag.yellow(),
        RecommendationType::Popular => tag.magenta(),
    }
}

// ABOUTME: Motivational notification templates used when a daily goal is missed
// ABOUTME: Three templates per metric kind; some interpolate the remaining gap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! Notification templates.
//!
//! `{gap}` is replaced with the remaining amount for the metric (steps for the
//! steps templates, whole hours for the sleep templates).

/// Placeholder substituted with the metric gap
pub const GAP_PLACEHOLDER: &str = "{gap}";

/// Templates for a missed steps goal
pub const STEPS_TEMPLATES: [&str; 3] = [
    "You're doing great! Just {gap} more steps to reach your goal. Keep going!",
    "Almost there! Just a few more steps and you'll hit your target.",
    "You've got this! Every step counts towards your goal.",
];

/// Templates for a missed sleep goal
pub const SLEEP_TEMPLATES: [&str; 3] = [
    "Remember, quality sleep is key to your health. Try to get {gap} more hours of rest.",
    "Your body needs rest to perform at its best. Aim for a bit more sleep tonight.",
    "A good night's sleep is the best investment in your health.",
];

/// Templates for a heart rate above goal
pub const HEART_RATE_TEMPLATES: [&str; 3] = [
    "Take a moment to relax and breathe. Your heart rate is a bit high.",
    "A few deep breaths can help bring your heart rate down.",
    "Your heart is working hard. Let's give it a break with some relaxation.",
];

pub mod confetti_layer;
pub mod confirmation;
pub mod ending_card;
pub mod error_notice;
pub mod figure;
pub mod games;
pub mod header;
pub mod interlude_card;
pub mod nav_bar;
pub mod progress_bar;
pub mod question_card;
pub mod resume_prompt;

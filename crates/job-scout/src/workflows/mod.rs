pub mod intake;
pub mod outreach;
pub mod pipeline;
pub mod screening;
pub mod tracker;

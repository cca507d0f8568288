pub mod block;
pub mod crop;
pub mod notifier;
pub mod rules;
pub mod wall;

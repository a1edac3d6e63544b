// HTTP host surface for a panel.

pub mod handler;

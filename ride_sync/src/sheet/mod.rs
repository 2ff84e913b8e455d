//! The spreadsheet side: the webhook and the synchronizer pushing new rides to it.

mod synchronizer;
mod webhook;

pub use synchronizer::*;
pub use webhook::SheetWebhook;

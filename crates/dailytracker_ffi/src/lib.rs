//! Flutter bridge crate for DailyTracker.
//! Only `api` is exposed to the code generator; everything else stays in core.

pub mod api;

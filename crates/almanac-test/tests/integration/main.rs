//! End-to-end tests over the public codec and reconciliation surface.

mod calendar;
mod contacts;
mod dedup;
mod helpers;
mod reconcile;

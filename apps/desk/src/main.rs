//! # Room Rent Desk Entry Point
//!
//! The actual setup is in lib.rs so the commands can be tested.

fn main() -> anyhow::Result<()> {
    roomrent_desk::run()
}

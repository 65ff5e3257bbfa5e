//! `fcm whoami` – show the signed-in user.

use fcm_core::kv::KeyValueStore;
use fcm_core::Dashboard;

pub fn run_whoami<S: KeyValueStore>(dashboard: &Dashboard<S>) {
    match dashboard.user() {
        Some(user) => println!("Logged in as: {}", user.label()),
        None => println!("Not logged in."),
    }
}

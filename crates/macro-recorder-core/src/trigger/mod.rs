mod binding;
mod role;
mod trigger_key;

pub use {binding::TriggerBindings, role::TriggerRole, trigger_key::TriggerKey};

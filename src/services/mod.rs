// Tabshell services
// Services own configuration and other state that lives outside the tab set.

pub mod config_engine;

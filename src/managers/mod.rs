// Tabshell state managers
// Managers handle the stateful core: the tab metadata store, window layout,
// popup interception, and the tab multiplexer that ties them together.

pub mod layout;
pub mod metadata_store;
pub mod popup_policy;
pub mod tab_multiplexer;

// UI module for the RC Control Station
//
// This module organizes the UI into separate components:
// - `app_state`: application state management and main update loop
// - `control_pad`: the four directional zones and their input adapters
// - `status_panel`: device status tile column
// - `tiles`: pure tile derivation from current state

pub mod app_state;
pub mod control_pad;
pub mod status_panel;
pub mod tiles;

pub use app_state::AppState;

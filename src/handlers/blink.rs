use crate::{hub::Command, state::AppState};
use axum::extract::State;
use tokio::time::sleep;
use tracing::info;

/// The fixed blink sequence: two full OFF/ON cycles.
const BLINK_PHASES: [Command; 4] = [Command::Off, Command::On, Command::Off, Command::On];

/// Blink the configured item set. Per-item writes within a phase are fired
/// without being awaited; only the inter-phase delay orders the sequence.
/// The response is sent after the final delay has elapsed.
pub async fn blink(State(state): State<AppState>) -> &'static str {
    let items = &state.config.blink_items;
    info!("Blinking {items:?}");

    for phase in BLINK_PHASES {
        state.hub.send_command_all(items, phase);
        sleep(state.config.blink_phase_delay).await;
    }

    state.metrics.blink_sequences_total.inc();
    "And it Blinked!"
}

// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};

use crate::core::manager_msg::ManagerMsg;
use crate::sdebug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Posts a `Tick` for `session` every second until aborted or the daemon goes away.
pub async fn run_ticker(tx: Sender<ManagerMsg>, session: u64) {
    sdebug!("Tally", "ticker started (session={})", session);

    let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;

        if tx.send(ManagerMsg::Tick { session }).await.is_err() {
            sdebug!("Tally", "ticker stopping (receiver dropped)");
            break;
        }
    }
}

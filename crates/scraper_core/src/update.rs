use crate::{Effect, Msg, Phase, PollerState, SleepKind};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current phase are ignored.
pub fn update(mut state: PollerState, msg: Msg) -> (PollerState, Vec<Effect>) {
    if state.is_stopped() {
        return (state, Vec::new());
    }

    let effects = match (state.phase(), msg) {
        (_, Msg::StopRequested) => {
            state.drop_pending();
            state.set_phase(Phase::Stopped);
            Vec::new()
        }
        (Phase::Init, Msg::Started) => {
            state.begin_cycle();
            vec![Effect::Fetch]
        }
        (Phase::Fetching, Msg::FetchFailed { .. }) => {
            // The cycle is skipped: no decode, no writes.
            state.record_fetch_failure();
            sleep(&mut state, SleepKind::Backoff)
        }
        (Phase::Fetching, Msg::FetchCompleted { body, .. }) => {
            // Status is informational only; decoding proceeds for non-2xx too.
            state.set_phase(Phase::Decoding);
            vec![Effect::Decode { body }]
        }
        (Phase::Decoding, Msg::Decoded { records }) => {
            state.load_batch(records);
            write_next_or_sleep(&mut state)
        }
        (Phase::Writing, Msg::RecordWritten { .. }) => {
            state.record_written();
            write_next_or_sleep(&mut state)
        }
        (Phase::Writing, Msg::RecordFailed { .. }) => {
            state.abort_batch();
            sleep(&mut state, SleepKind::Normal)
        }
        (Phase::Sleeping(_), Msg::SleepElapsed) => {
            state.begin_cycle();
            if state.take_store_suspect() {
                vec![Effect::CheckStore, Effect::Fetch]
            } else {
                vec![Effect::Fetch]
            }
        }
        _ => Vec::new(),
    };

    (state, effects)
}

fn write_next_or_sleep(state: &mut PollerState) -> Vec<Effect> {
    match state.next_record() {
        Some(record) => {
            state.set_phase(Phase::Writing);
            vec![Effect::WriteRecord(record)]
        }
        None => sleep(state, SleepKind::Normal),
    }
}

fn sleep(state: &mut PollerState, kind: SleepKind) -> Vec<Effect> {
    state.set_phase(Phase::Sleeping(kind));
    vec![Effect::Sleep {
        kind,
        duration: state.cadence().duration(kind),
    }]
}

use super::{state_hash::StateHash, BlockState, BlockStateIndex, StateID};
use crate::{config::DecodePolicy, LoadError};
use log::{debug, warn};
use std::{collections::HashMap, io::Read};
use tedac_nbt::{Encoding, NbtDecoder, NbtRepr, NbtReprError};

/// Decodes the block state stream, assigning runtime IDs in the order the states appear.
pub(crate) fn load_block_states<R: Read>(
    source: R,
    encoding: Encoding,
    policy: DecodePolicy,
) -> Result<BlockStateIndex, LoadError> {
    let mut decoder = NbtDecoder::new(source, encoding);
    let mut states: Vec<BlockState> = Vec::new();
    let mut runtime_ids = HashMap::new();
    let mut collisions = 0;

    loop {
        let index = states.len();

        let state = match next_state(&mut decoder, index) {
            Ok(Some(state)) => state,
            Ok(None) => break,
            Err(error) if policy == DecodePolicy::Tolerant && !is_integrity_violation(&error) => {
                warn!(
                    "Stopped decoding block states early, keeping the first {}: {}",
                    index, error
                );
                break;
            }
            Err(error) => return Err(error),
        };

        let id = StateID::try_from(index).map_err(|_| LoadError::TooManyStates)?;

        if let Some(previous) = runtime_ids.insert(StateHash::new(&state.name, &state.properties), id) {
            collisions += 1;
            warn!(
                "Block state {} (runtime ID {}) has the same key as {} (runtime ID {}) and replaces it",
                state, id, states[previous as usize], previous
            );
        }

        states.push(state);
    }

    debug!(
        "Decoded {} block states, {} of which are shadowed by a later state",
        states.len(),
        collisions
    );

    Ok(BlockStateIndex {
        runtime_ids,
        states: states.into_boxed_slice(),
        collisions,
    })
}

fn next_state<R: Read>(
    decoder: &mut NbtDecoder<R>,
    index: usize,
) -> Result<Option<BlockState>, LoadError> {
    let compound = match decoder
        .next_root()
        .map_err(|source| LoadError::StateRecord { index, source })?
    {
        Some((compound, _)) => compound,
        None => return Ok(None),
    };

    BlockState::from_nbt(&compound)
        .map(Some)
        .map_err(|source| LoadError::InvalidState { index, source })
}

// Property types outside the catalog format mean the reader and the catalog disagree on the format, which
// no decode policy may paper over
fn is_integrity_violation(error: &LoadError) -> bool {
    matches!(error, LoadError::InvalidState {
        source: NbtReprError::Conversion(_),
        ..
    })
}

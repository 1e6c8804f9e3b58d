// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot round trips through CBOR and JSON

use pins_core::snapshot::{restore_from_cbor, snapshot_digest};
use pins_core::{GameError, GameSnapshot, GameState};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Three players on a 6x6 dot grid, part way through
fn mid_game() -> GameState {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = GameState::new(6, 3).unwrap();
    while game.history().len() < 40 {
        let edge = *game.undrawn_edges().choose(&mut rng).unwrap();
        game.play_edge(edge).unwrap();
    }
    assert!(!game.is_game_over());
    game
}

#[test]
fn test_snapshot_cbor_roundtrip() {
    let game = mid_game();
    let snapshot = GameSnapshot::capture(&game);

    let bytes = snapshot.to_cbor().expect("Failed to serialize to CBOR");
    let decoded = GameSnapshot::from_cbor(&bytes).expect("Failed to deserialize from CBOR");
    assert_eq!(decoded, snapshot);

    let restored = decoded.restore().expect("Failed to restore snapshot");
    assert_eq!(restored.history(), game.history());
    assert_eq!(restored.scores(), game.scores());
    assert_eq!(restored.current_player(), game.current_player());
    for edge in game.history() {
        assert_eq!(restored.edge_owner(*edge), game.edge_owner(*edge));
    }
    for cell in game.board().all_cells() {
        assert_eq!(restored.cell_owner(cell), game.cell_owner(cell));
    }
    assert_eq!(restored, game);
}

#[test]
fn test_snapshot_json_roundtrip() {
    let game = mid_game();
    let json = GameSnapshot::capture(&game).to_json().unwrap();
    assert!(json.contains("\"drawn_edges\""));

    let restored = GameSnapshot::from_json(&json).unwrap().restore().unwrap();
    assert_eq!(restored, game);
}

#[test]
fn test_restore_from_bytes() {
    let game = mid_game();
    let bytes = GameSnapshot::capture(&game).to_cbor().unwrap();
    assert_eq!(restore_from_cbor(&bytes).unwrap(), game);
    assert!(matches!(restore_from_cbor(&[0xff, 0x00]), Err(GameError::Snapshot(_))));
}

#[test]
fn test_digest_detects_desync() {
    let game = mid_game();
    let ours = GameSnapshot::capture(&game);
    let mut theirs = ours.clone();
    theirs.current_player = theirs.current_player % 3 + 1;

    assert_eq!(snapshot_digest(&ours).unwrap(), snapshot_digest(&ours.clone()).unwrap());
    assert_ne!(snapshot_digest(&ours).unwrap(), snapshot_digest(&theirs).unwrap());
}

#[test]
fn test_owner_mismatch_rejected() {
    let mut snapshot = GameSnapshot::capture(&mid_game());
    let first = snapshot.drawn_edges[0].clone();
    snapshot.edge_owners.insert(first, 9);
    assert!(matches!(snapshot.restore(), Err(GameError::Snapshot(_))));
}

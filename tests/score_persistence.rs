use std::time::Duration;

use tempfile::tempdir;

use recall::audio::SilentAudio;
use recall::presenter::NullPresenter;
use recall::score_store::{BestScoreStore, SqliteScoreStore};
use recall::sequence::ScriptedSignals;
use recall::{GameController, Phase, Signal};

fn play_and_lose_after(path: &std::path::Path, clean_rounds: u32) -> u32 {
    let store = SqliteScoreStore::open(path).unwrap();
    let mut g = GameController::new(
        Box::new(ScriptedSignals::new([Signal::Blue])),
        Box::new(store),
        NullPresenter,
        SilentAudio,
    );
    g.start();
    for _ in 0..=clean_rounds {
        while g.phase() != Phase::AwaitingInput {
            g.advance(Duration::from_millis(100));
        }
        if g.level() > clean_rounds {
            g.press(Signal::Green);
            break;
        }
        for s in g.sequence().to_vec() {
            g.press(s);
        }
    }
    assert_eq!(g.phase(), Phase::GameOver);
    g.best_score()
}

#[test]
fn best_score_survives_restarts_and_is_not_lowered() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.db");

    assert_eq!(play_and_lose_after(&path, 3), 60);
    assert_eq!(SqliteScoreStore::open(&path).unwrap().load().unwrap(), 60);

    // a worse game leaves the record alone
    assert_eq!(play_and_lose_after(&path, 1), 60);
    let store = SqliteScoreStore::open(&path).unwrap();
    assert_eq!(store.load().unwrap(), 60);
    assert_eq!(store.history(10).unwrap().len(), 1);

    // a better one adds a record
    assert_eq!(play_and_lose_after(&path, 4), 100);
    let store = SqliteScoreStore::open(&path).unwrap();
    assert_eq!(store.load().unwrap(), 100);
    assert_eq!(store.history(10).unwrap().len(), 2);
}

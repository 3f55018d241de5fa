use cueline::app::{Flow, run_command};
use cueline::core::CueCore;
use cueline::model::Settings;
use cueline::queue::MediaQueue;
use std::fs;
use tempfile::tempdir;

#[test]
fn playlist_flow_works() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("road trip.txt");
    let mut core = CueCore::with_queue(Settings::default(), MediaQueue::with_seed(1));

    for command in ["add Roadrunner", "add Radar Love", "add Born to Run", "next"] {
        assert_eq!(run_command(&mut core, command), Flow::Continue);
    }
    run_command(&mut core, &format!("save {}", path.display()));
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "Roadrunner\nRadar Love\nBorn to Run\n"
    );

    run_command(&mut core, "clear");
    assert!(core.queue.is_empty());

    run_command(&mut core, &format!("load {}", path.display()));
    assert_eq!(core.queue.len(), 3);
    assert_eq!(core.queue.current(), Some("Roadrunner"));
}

#[test]
fn loading_replaces_instead_of_appending() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("b.txt");
    fs::write(&path, "b1\n\nb2\n").expect("seed");

    let mut core = CueCore::with_queue(Settings::default(), MediaQueue::with_seed(2));
    core.add_track("a1");
    core.load_playlist(&path).expect("load");

    assert_eq!(core.queue.to_sequence(), vec!["b1", "b2"]);
}

#[test]
fn shuffle_command_switches_next_policy() {
    let mut core = CueCore::with_queue(Settings::default(), MediaQueue::with_seed(3));
    for name in ["a", "b", "c"] {
        core.add_track(name);
    }
    run_command(&mut core, "shuffle on");

    for _ in 0..50 {
        let before = core.queue.current().map(str::to_owned);
        run_command(&mut core, "next");
        assert_ne!(core.queue.current().map(str::to_owned), before);
    }

    run_command(&mut core, "shuffle off");
    run_command(&mut core, "prev");
    run_command(&mut core, "prev");
    run_command(&mut core, "prev");
    assert_eq!(core.queue.current(), Some("a"));
}

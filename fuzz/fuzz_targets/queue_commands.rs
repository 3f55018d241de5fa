#![no_main]

use cueline::queue::MediaQueue;
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 4] = ["a", "b", "c", "a"];

fuzz_target!(|data: &[u8]| {
    let mut queue = MediaQueue::with_seed(0);
    let mut model: Vec<&str> = Vec::new();

    for byte in data {
        let name = NAMES[usize::from(byte >> 6)];
        match byte % 7 {
            0 | 1 => {
                queue.insert(name);
                model.push(name);
            }
            2 => {
                let removed = queue.remove(name);
                let position = model.iter().position(|n| *n == name);
                assert_eq!(removed, position.is_some());
                if let Some(position) = position {
                    model.remove(position);
                }
            }
            3 => queue.advance(),
            4 => queue.retreat(),
            5 => queue.set_shuffle(!queue.shuffle_enabled()),
            _ => {
                if byte & 0x20 != 0 {
                    queue.clear();
                    model.clear();
                }
            }
        }

        assert_eq!(queue.len(), model.len());
        assert_eq!(queue.is_empty(), queue.current().is_none());
        if let Some(current) = queue.current() {
            assert!(queue.contains(current));
        }
    }

    assert_eq!(queue.to_sequence(), model);
});

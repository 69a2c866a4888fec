use multispin::{Spinner, SpinnerOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn spinner(message: &str) -> Spinner {
    Spinner::new(SpinnerOptions {
        message: message.to_string(),
        ..SpinnerOptions::default()
    })
}

/// Readers never see a line torn between two updates.
#[test]
fn test_print_is_consistent_under_concurrent_updates() {
    let spinner = spinner("start");
    let stop = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|id| {
            let spinner = spinner.clone();
            thread::spawn(move || {
                for step in 0..500 {
                    spinner.update_prefix_fmt(format_args!("[{}] ", id));
                    spinner.update_message_fmt(format_args!("writer {} step {}", id, step));
                }
            })
        })
        .collect();

    let reader = {
        let spinner = spinner.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut lines = 0;
            loop {
                let mut buf: Vec<u8> = Vec::new();
                spinner.print(&mut buf, "-");
                let line = String::from_utf8(buf).unwrap();
                assert!(line.ends_with("\r\n"));
                assert_eq!(line.matches("\r\n").count(), 1);
                assert!(line.contains("- "));
                lines += 1;

                if stop.load(Ordering::Acquire) {
                    break lines;
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    stop.store(true, Ordering::Release);
    assert!(reader.join().unwrap() > 0);

    let message = spinner.get_message();
    assert!(message.ends_with("step 499"), "unexpected final message: {}", message);
}

#[test]
fn test_flags_set_from_different_threads() {
    let spinner = spinner("job");

    let completer = {
        let spinner = spinner.clone();
        thread::spawn(move || spinner.complete())
    };
    let failer = {
        let spinner = spinner.clone();
        thread::spawn(move || spinner.error())
    };
    completer.join().unwrap();
    failer.join().unwrap();

    assert!(spinner.is_complete());
    assert!(spinner.is_error());

    let mut buf: Vec<u8> = Vec::new();
    spinner.print(&mut buf, "-");
    assert_eq!(String::from_utf8(buf).unwrap(), "✗ job\r\n");
}

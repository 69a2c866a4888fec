use anyhow::Result;
use multispin::ui::terminal;
use multispin::{Animation, Color, SpinnerConfig, SpinnerError, SpinnerManager};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// Output sink the test can read back while the manager owns a clone.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn sequence(op: fn(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buf = Vec::new();
    op(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn test_manager(chars: &[&str], frame_duration: Duration) -> (SpinnerManager, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let manager = SpinnerManager::builder()
        .with_char_map(chars.iter().copied())
        .with_frame_duration(frame_duration)
        .without_colors()
        .with_signal_handler(false)
        .with_writer(buffer.clone())
        .build()
        .unwrap();
    (manager, buffer)
}

#[test]
fn test_manager_defaults() {
    let manager = SpinnerManager::new();
    assert_eq!(manager.get_frame_duration(), Duration::from_millis(250));
    assert_eq!(manager.get_char_map(), Animation::Dots.char_map().as_slice());
    assert_eq!(manager.current_frame(), 0);
    assert!(manager.get_spinners().is_empty());
    assert!(!manager.is_running());
}

#[test]
fn test_builder_rejects_invalid_options() {
    let empty: [&str; 0] = [];
    let result = SpinnerManager::builder().with_char_map(empty).build();
    assert!(matches!(result, Err(SpinnerError::EmptyCharMap)));

    let result = SpinnerManager::builder()
        .with_frame_duration(Duration::ZERO)
        .build();
    assert!(matches!(result, Err(SpinnerError::ZeroFrameDuration)));
}

#[test]
fn test_builder_options_apply_in_order() {
    let manager = SpinnerManager::builder()
        .with_animation(Animation::Line)
        .with_frame_duration(Duration::from_millis(40))
        .build()
        .unwrap();
    assert_eq!(manager.get_frame_duration(), Duration::from_millis(40));
    assert_eq!(manager.get_char_map(), ["-", "\\", "|", "/"]);

    let manager = SpinnerManager::builder()
        .with_frame_duration(Duration::from_millis(40))
        .with_animation(Animation::Line)
        .build()
        .unwrap();
    assert_eq!(manager.get_frame_duration(), Animation::Line.interval());
}

#[test]
fn test_add_spinner_keeps_insertion_order() {
    let (manager, _) = test_manager(&["-"], Duration::from_millis(10));
    for name in ["first", "second", "third"] {
        manager.add_spinner(name);
    }

    let messages: Vec<String> = manager
        .get_spinners()
        .iter()
        .map(|s| s.get_message())
        .collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[test]
fn test_add_spinner_inherits_manager_icons() {
    let manager = SpinnerManager::builder()
        .with_complete_character("+")
        .with_error_character("!")
        .build()
        .unwrap();

    let spinner = manager.add_spinner("job");
    assert_eq!(spinner.get_complete_character(), "+");
    assert_eq!(spinner.get_error_character(), "!");
}

#[test]
fn test_render_frame_writes_one_block() {
    let (manager, buffer) = test_manager(&["-", "\\"], Duration::from_millis(10));
    manager.add_spinner("a");
    manager.add_spinner("b");

    manager.render_frame();

    let want = format!(
        "{}{}- a\r\n- b\r\n{}",
        sequence(terminal::save_cursor),
        sequence(terminal::hide_cursor),
        sequence(terminal::restore_cursor)
    );
    assert_eq!(buffer.contents(), want);
}

#[test]
fn test_frame_index_advances_and_wraps() {
    let (manager, _) = test_manager(&["a", "b", "c"], Duration::from_millis(10));
    manager.add_spinner("x");

    let mut seen = Vec::new();
    for _ in 0..4 {
        manager.render_frame();
        seen.push(manager.current_frame());
    }
    assert_eq!(seen, vec![1, 2, 0, 1]);
}

#[test]
fn test_completed_spinner_renders_check_mark() {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    let spinner = manager.add_spinner("working");
    spinner.complete_with_message("done");

    manager.render_frame();
    assert!(buffer.contents().contains("✓ done\r\n"));
}

#[test]
fn test_colored_render_uses_manager_colors() {
    let buffer = SharedBuffer::default();
    let manager = SpinnerManager::builder()
        .with_char_map(["*"])
        .with_spinner_color(Color::Cyan)
        .with_error_color(Color::Magenta)
        .with_writer(buffer.clone())
        .build()
        .unwrap();
    manager.add_spinner("spinning");
    manager.add_spinner("broken").error();

    manager.render_frame();

    let output = buffer.contents();
    assert!(output.contains(&format!("{} spinning\r\n", Color::Cyan.paint("*"))));
    assert!(output.contains(&format!("{} broken\r\n", Color::Magenta.paint("✗"))));
}

#[test]
fn test_with_config_applies_file_options() -> Result<()> {
    let config = SpinnerConfig {
        animation: Some(Animation::Arc),
        frame_duration_ms: Some(60),
        complete_character: "ok".to_string(),
        ..SpinnerConfig::default()
    };

    let manager = SpinnerManager::builder().with_config(&config).build()?;
    assert_eq!(manager.get_char_map(), Animation::Arc.char_map().as_slice());
    assert_eq!(manager.get_frame_duration(), Duration::from_millis(60));
    assert_eq!(manager.add_spinner("x").get_complete_character(), "ok");
    Ok(())
}

/// Two-glyph table at 10ms, stopped at 25ms: passes at 10ms and 20ms draw
/// `-` then `\`, and the persisted frame uses the advanced index, `-` again.
#[tokio::test(start_paused = true)]
async fn test_render_loop_end_to_end() -> Result<()> {
    let (manager, buffer) = test_manager(&["-", "\\"], Duration::from_millis(10));
    manager.add_spinner("loading");

    manager.init();
    assert!(manager.is_running());
    sleep(Duration::from_millis(25)).await;
    manager.stop().await;
    assert!(!manager.is_running());

    let output = buffer.contents();
    let show = sequence(terminal::show_cursor);
    assert!(output.ends_with(&show), "cursor shown last");

    let glyphs: Vec<char> = output
        .split("\r\n")
        .filter_map(|chunk| chunk.strip_suffix(" loading"))
        .filter_map(|head| head.chars().last())
        .collect();
    assert_eq!(glyphs, vec!['-', '\\', '-']);
    assert!(!output.contains('✓'));
    assert!(!output.contains('✗'));
    Ok(())
}

#[tokio::test]
async fn test_stop_persists_final_frame_once() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("one").complete();
    manager.add_spinner("two").error();

    manager.init();
    sleep(Duration::from_millis(35)).await;
    manager.stop().await;

    let output = buffer.contents();
    let restore = sequence(terminal::restore_cursor);
    let tail = &output[output.rfind(&restore).expect("at least one pass") + restore.len()..];
    assert_eq!(
        tail,
        format!("✓ one\r\n✗ two\r\n{}", sequence(terminal::show_cursor))
    );
    Ok(())
}

#[tokio::test]
async fn test_stop_is_idempotent() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("task");

    manager.init();
    sleep(Duration::from_millis(15)).await;
    manager.stop().await;
    let after_first = buffer.contents();

    manager.stop().await;
    assert_eq!(buffer.contents(), after_first);
    Ok(())
}

#[tokio::test]
async fn test_racing_stop_waits_for_final_frame() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("task");

    manager.init();
    sleep(Duration::from_millis(15)).await;

    // The first stop owns the shutdown; the second must not return early.
    let show = sequence(terminal::show_cursor);
    let ((), seen_by_second) = tokio::join!(manager.stop(), async {
        manager.stop().await;
        buffer.contents()
    });

    assert!(seen_by_second.ends_with(&show));
    assert_eq!(buffer.contents().matches(&show).count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_stop_without_init_writes_nothing() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("idle");

    manager.stop().await;
    assert!(buffer.contents().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_second_init_is_ignored() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("task");

    manager.init();
    manager.init();
    sleep(Duration::from_millis(25)).await;
    manager.stop().await;

    let show = sequence(terminal::show_cursor);
    assert_eq!(buffer.contents().matches(&show).count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_spinner_added_while_running_is_rendered() -> Result<()> {
    let (manager, buffer) = test_manager(&["-"], Duration::from_millis(10));
    manager.add_spinner("early");

    manager.init();
    sleep(Duration::from_millis(25)).await;
    manager.add_spinner("late");
    sleep(Duration::from_millis(25)).await;
    manager.stop().await;

    let output = buffer.contents();
    let restore = sequence(terminal::restore_cursor);
    let passes_with_late = output
        .split(restore.as_str())
        .filter(|pass| pass.contains("- early\r\n- late\r\n"))
        .count();
    assert!(passes_with_late >= 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_updates_while_rendering() -> Result<()> {
    let (manager, buffer) = test_manager(&["-", "\\"], Duration::from_millis(5));
    let spinners: Vec<_> = (0..8)
        .map(|i| manager.add_spinner(format!("worker {} starting", i)))
        .collect();

    manager.init();

    let handles: Vec<_> = spinners
        .into_iter()
        .enumerate()
        .map(|(i, spinner)| {
            std::thread::spawn(move || {
                for step in 0..200 {
                    spinner.update_message_fmt(format_args!("worker {} step {}", i, step));
                    if step % 50 == 0 {
                        std::thread::sleep(Duration::from_millis(1));
                    }
                }
                spinner.complete_with_message_fmt(format_args!("worker {} done", i));
            })
        })
        .collect();

    tokio::task::spawn_blocking(move || {
        for handle in handles {
            handle.join().unwrap();
        }
    })
    .await?;

    manager.stop().await;

    assert!(manager.get_spinners().iter().all(|s| s.is_complete()));
    let output = buffer.contents();
    for i in 0..8 {
        assert!(output.contains(&format!("✓ worker {} done\r\n", i)));
    }
    Ok(())
}

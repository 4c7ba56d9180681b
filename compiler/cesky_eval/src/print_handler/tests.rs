use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_separates_streams() {
    let handler = BufferPrintHandler::new();
    handler.write(HandleKind::Stdout, "out");
    handler.write(HandleKind::Stderr, "err");
    assert_eq!(handler.get_output(), "out");
    assert_eq!(handler.get_errors(), "err");
}

#[test]
fn write_line_appends_newline() {
    let handler = buffer_handler();
    handler.write_line(HandleKind::Stdout, "hello");
    handler.write(HandleKind::Stdout, "world");
    assert_eq!(handler.get_output(), "hello\nworld");
}

#[test]
fn clear_empties_both_buffers() {
    let handler = buffer_handler();
    handler.write(HandleKind::Stdout, "a");
    handler.write(HandleKind::Stderr, "b");
    handler.clear();
    assert!(handler.get_output().is_empty());
    assert!(handler.get_errors().is_empty());
}

#[test]
fn silent_discards() {
    let handler = silent_handler();
    handler.write_line(HandleKind::Stdout, "gone");
    assert_eq!(handler.get_output(), "");
    handler.clear();
}

#[test]
fn stdio_does_not_capture() {
    let handler = stdio_handler();
    assert_eq!(handler.get_output(), "");
    assert_eq!(handler.get_errors(), "");
}

#[test]
fn shared_buffer_is_thread_safe() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    let worker = std::thread::spawn(move || {
        for _ in 0..100 {
            other.write_line(HandleKind::Stdout, "a");
        }
    });
    for _ in 0..100 {
        handler.write_line(HandleKind::Stdout, "b");
    }
    assert!(worker.join().is_ok());
    assert_eq!(handler.get_output().lines().count(), 200);
}

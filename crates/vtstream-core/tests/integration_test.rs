use vtstream_common::types::Size;
use vtstream_core::{Event, HostCommand, Terminal};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_terminal_echo() {
    let size = Size::new(80, 24);
    let terminal = Terminal::new(size).expect("Failed to create terminal");

    let cmd_sender = terminal.command_sender();
    let mut event_receiver = terminal.event_receiver();
    let screen = terminal.screen();

    let terminal_handle = tokio::spawn(async move { terminal.run().await });

    cmd_sender
        .send(HostCommand::Write(b"echo hello\n".to_vec()))
        .await
        .expect("Failed to send command");

    let mut output = Vec::new();
    let start = tokio::time::Instant::now();

    while start.elapsed() < Duration::from_secs(2) {
        match timeout(Duration::from_millis(100), event_receiver.recv()).await {
            Ok(Ok(event)) => {
                if let Event::OutputReady(data) = event {
                    output.extend_from_slice(&data);

                    let output_str = String::from_utf8_lossy(&output);
                    if output_str.contains("hello") {
                        break;
                    }
                }
            }
            _ => continue,
        }
    }

    cmd_sender.send(HostCommand::Close).await.ok();

    timeout(Duration::from_secs(5), terminal_handle)
        .await
        .expect("Terminal didn't close in time")
        .expect("Terminal task panicked")
        .expect("Terminal returned error");

    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("hello"), "Output doesn't contain 'hello': {}", output_str);

    let rendered = {
        let screen = screen.read();
        let model = screen.model();
        let buf = model.active_buffer();
        (0..size.rows)
            .filter_map(|row| buf.line(row))
            .flat_map(|line| line.cells.iter().map(|c| c.base_char()))
            .collect::<String>()
    };
    assert!(rendered.contains("hello"), "screen model doesn't contain 'hello': {:?}", rendered);
}

#[tokio::test]
async fn test_terminal_resize() {
    let initial_size = Size::new(80, 24);
    let terminal = Terminal::new(initial_size).expect("Failed to create terminal");

    let cmd_sender = terminal.command_sender();
    let mut event_receiver = terminal.event_receiver();
    let screen = terminal.screen();

    let terminal_handle = tokio::spawn(async move { terminal.run().await });

    let new_size = Size::new(100, 30);
    cmd_sender
        .send(HostCommand::Resize(new_size))
        .await
        .expect("Failed to send resize");

    let start = tokio::time::Instant::now();
    let mut resized = false;

    while start.elapsed() < Duration::from_secs(2) {
        match timeout(Duration::from_millis(100), event_receiver.recv()).await {
            Ok(Ok(event)) => {
                if let Event::Resized(size) = event {
                    assert_eq!(size, new_size);
                    resized = true;
                    break;
                }
            }
            _ => continue,
        }
    }

    assert!(resized, "Didn't receive resize event");
    assert_eq!(screen.read().size(), new_size);

    cmd_sender.send(HostCommand::Close).await.ok();
    timeout(Duration::from_secs(5), terminal_handle).await.ok();
}

#[tokio::test]
async fn test_terminal_initial_state() {
    let size = Size::new(80, 24);
    let terminal = Terminal::new(size).expect("Failed to create terminal");

    assert_eq!(terminal.size(), size);
    let screen = terminal.screen();
    let screen = screen.read();
    assert_eq!(screen.size(), size);
    assert_eq!(screen.cursor_position(), vtstream_common::types::Position::ORIGIN);
}

#[cfg(unix)]
#[tokio::test]
async fn test_shell_spawn() {
    use vtstream_core::PtyManager;
    use vtstream_common::traits::TerminalBackend;

    let size = Size::new(80, 24);
    let mut pty = PtyManager::spawn_shell(size).expect("Failed to spawn shell");

    assert!(pty.is_alive().await);

    let written = pty.write(b"exit\n").await.expect("Failed to write");
    assert_eq!(written, 5);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(!pty.is_alive().await);
}

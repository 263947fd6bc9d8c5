use vtstream_common::types::Size;
use vtstream_core::{Event, HostCommand, Terminal};
use tokio::time::Duration;

#[tokio::test]
async fn test_pty_nonblocking_fix() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Testing PTY Non-blocking Fix ===");

    let size = Size::new(80, 24);
    let terminal = Terminal::new(size)?;
    let cmd_sender = terminal.command_sender();
    let mut event_receiver = terminal.event_receiver();
    let screen = terminal.screen();

    let terminal_handle = tokio::spawn(async move { terminal.run().await });

    let event_handle = tokio::spawn(async move {
        let mut outputs = Vec::new();
        let mut closed = false;

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while tokio::time::Instant::now() < deadline && !closed {
            tokio::select! {
                event = event_receiver.recv() => {
                    if let Ok(event) = event {
                        match event {
                            Event::OutputReady(data) => {
                                let text = String::from_utf8_lossy(&data).to_string();
                                println!("Output: {:?}", text);
                                outputs.push(text);
                            }
                            Event::Closed => {
                                println!("Terminal closed");
                                closed = true;
                            }
                            _ => {}
                        }
                    }
                }
                _ = tokio::time::sleep(Duration::from_millis(100)) => {}
            }
        }

        outputs
    });

    tokio::time::sleep(Duration::from_millis(1000)).await;

    println!("Sending newline...");
    cmd_sender.send(HostCommand::Write(vec![b'\n'])).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("Sending 'echo test'...");
    cmd_sender.send(HostCommand::Write(b"echo test\n".to_vec())).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("Sending 'echo hello'...");
    cmd_sender.send(HostCommand::Write(b"echo hello\n".to_vec())).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("Closing terminal...");
    cmd_sender.send(HostCommand::Close).await?;

    let _ = tokio::time::timeout(Duration::from_secs(2), terminal_handle).await;
    let outputs = tokio::time::timeout(Duration::from_secs(2), event_handle).await??;

    println!("\nReceived {} outputs", outputs.len());
    let combined = outputs.join("");

    if outputs.len() <= 2 {
        panic!("Terminal stopped responding after first input! Only got {} outputs", outputs.len());
    }

    if !combined.contains("test") || !combined.contains("hello") {
        panic!("Expected output not found. Got: {}", combined);
    }

    // Raw PTY bytes aren't what a host actually renders — confirm the screen
    // model parsed and placed the same text the shell echoed back.
    let rendered = {
        let screen = screen.read();
        let model = screen.model();
        let buf = model.active_buffer();
        (0..size.rows)
            .filter_map(|row| buf.line(row))
            .flat_map(|line| line.cells.iter().map(|c| c.base_char()))
            .collect::<String>()
    };
    assert!(rendered.contains("test") && rendered.contains("hello"), "screen model missing echoed text: {:?}", rendered);

    println!("\nTest passed! Terminal continues working after input");
    println!("   - Received {} outputs", outputs.len());
    println!("   - Shell responded to multiple commands");

    Ok(())
}

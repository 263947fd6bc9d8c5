use vtstream_common::types::Size;
use vtstream_core::{Event, HostCommand, Terminal};
use std::time::{Duration, Instant};
use tokio::time;

#[tokio::test]
async fn test_no_busy_loop() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Testing No Busy Loop with Blocking I/O ===");

    let size = Size::new(80, 24);
    let terminal = Terminal::new(size)?;
    let cmd_sender = terminal.command_sender();
    let mut event_receiver = terminal.event_receiver();
    let screen = terminal.screen();

    let start = Instant::now();

    let terminal_handle = tokio::spawn(async move { terminal.run().await });

    let event_handle = tokio::spawn(async move {
        let mut read_count = 0;
        let deadline = time::Instant::now() + Duration::from_secs(2);

        while time::Instant::now() < deadline {
            tokio::select! {
                event = event_receiver.recv() => {
                    if let Ok(event) = event {
                        if let Event::OutputReady(_) = event {
                            read_count += 1;
                        }
                    }
                }
                _ = time::sleep(Duration::from_millis(10)) => {}
            }
        }

        read_count
    });

    time::sleep(Duration::from_millis(500)).await;

    cmd_sender.send(HostCommand::Write(b"echo test\n".to_vec())).await?;

    let final_count = time::timeout(Duration::from_secs(3), event_handle).await??;

    cmd_sender.send(HostCommand::Close).await?;
    let _ = time::timeout(Duration::from_secs(1), terminal_handle).await;

    let elapsed = start.elapsed();
    println!("Test ran for {:?}", elapsed);
    println!("Total reads: {}", final_count);

    assert!(final_count < 20, "Too many reads ({}), likely a busy loop!", final_count);
    assert!(final_count >= 2, "Too few reads ({}), terminal not working!", final_count);

    // The point of this core isn't just that bytes came back without a busy
    // loop — they have to have actually landed in the screen grid.
    let rendered = {
        let screen = screen.read();
        let model = screen.model();
        let buf = model.active_buffer();
        (0..size.rows)
            .filter_map(|row| buf.line(row))
            .flat_map(|line| line.cells.iter().map(|c| c.base_char()))
            .collect::<String>()
    };
    assert!(rendered.contains("echo test"), "command text never reached the screen model: {:?}", rendered);

    println!("No busy loop detected - proper blocking I/O!");

    Ok(())
}

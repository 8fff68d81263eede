use anyhow::{Context, Result};
use pullrefresh::PullRefreshConfig;
use pullrefresh_demo::{DemoFrame, DemoScreen};
use pullrefresh_foundation::PointerEventKind;
use pullrefresh_ui_graphics::Density;

const MAX_FRAMES: usize = 600;

fn print_frame(label: &str, frame: &DemoFrame) {
    println!(
        "{label:>10} | offset {:>6.1} | indicator {:>6.1} | {} | {}",
        frame.content_offset_y,
        frame.indicator_offset_y,
        frame.indicator,
        frame.content.first().map(String::as_str).unwrap_or("")
    );
}

fn run_until_idle(screen: &mut DemoScreen, label: &str) {
    let mut frames = 0;
    while !screen.is_idle() && frames < MAX_FRAMES {
        let frame = screen.frame();
        if frames % 6 == 0 {
            print_frame(label, &frame);
        }
        frames += 1;
    }
    print_frame(label, &screen.frame());
}

/// Slide a pointer from `from_y` to `to_y` over `duration_millis`, one move per frame.
fn pointer_drag(screen: &mut DemoScreen, from_y: f32, to_y: f32, duration_millis: u64) {
    let steps = (duration_millis / 16).max(1);
    let mut uptime = 0;
    screen.pointer(PointerEventKind::Down, from_y, uptime);
    for step in 1..=steps {
        uptime += 16;
        let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
        screen.pointer(PointerEventKind::Move, y, uptime);
        print_frame("drag", &screen.frame());
    }
    screen.pointer(PointerEventKind::Up, to_y, uptime);
}

fn parse_density() -> Result<Density> {
    match std::env::args().nth(1) {
        Some(arg) => {
            let density: f32 = arg
                .parse()
                .with_context(|| format!("density must be a number, got {arg:?}"))?;
            Ok(Density::new(density))
        }
        None => Ok(Density::default()),
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let density = parse_density()?;
    let mut screen = DemoScreen::new(PullRefreshConfig::default(), density)?;

    println!("=== Pull to refresh (density {}) ===", density.density);
    println!("A short pull springs back; a long pull refreshes for a moment.");
    println!();

    pointer_drag(&mut screen, 100.0, 180.0, 160);
    run_until_idle(&mut screen, "release");
    println!();

    pointer_drag(&mut screen, 100.0, 420.0, 320);
    run_until_idle(&mut screen, "refresh");
    println!();

    pointer_drag(&mut screen, 400.0, 100.0, 240);
    run_until_idle(&mut screen, "scroll");

    println!();
    println!(
        "refreshes: {}, list scrolled to {:.1}",
        screen.refresh_count(),
        screen.list_scroll()
    );
    Ok(())
}

use sprig_engine::{GameHost, HeadlessDevice, Renderer};

mod game;
use game::WalkDemo;

const FRAMES: u32 = 120;
const DT: f64 = 1.0 / 60.0;

fn main() -> sprig_engine::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut device = HeadlessDevice::new(320.0, 180.0);
    device.insert_solid("bundle://hero.png", 64, 16, [240, 200, 120, 255])?;
    device.insert_solid("bundle://tiles.png", 128, 16, [60, 140, 60, 255])?;

    let mut host = GameHost::new(WalkDemo::new(), device);
    host.load()?;

    for frame in 0..FRAMES {
        host.frame(DT)?;
        if frame % 30 == 0 {
            if let Some(hero) = host.game().hero() {
                log::info!(
                    "frame {:3}: hero at ({:6.2}, {:6.2}) showing {:?}",
                    frame,
                    hero.position().x,
                    hero.position().y,
                    hero.source()
                );
            }
        }
    }

    if let Some(renderer) = host.renderer() {
        let renderer = renderer.borrow();
        log::info!(
            "{} frames through the {} renderer, last frame: {} batches, {} sprites, {} vertex bytes",
            renderer.frame_count(),
            renderer.backend(),
            renderer.batches().len(),
            renderer.sprite_count(),
            renderer.batches().iter().map(|b| b.vertex_bytes().len()).sum::<usize>()
        );
    }
    Ok(())
}

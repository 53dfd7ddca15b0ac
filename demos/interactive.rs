//! Interactive grid canvas: drag to pan, scroll to zoom.

use gridplane::{GridWindow, WindowConfig};

fn main() -> Result<(), gridplane::GridError> {
    env_logger::init();

    let config = WindowConfig {
        title: "gridplane - infinite grid".to_string(),
        ..Default::default()
    };
    let mut window = pollster::block_on(GridWindow::new(config))?;
    window.run()
}

use std::{num::NonZeroU32, rc::Rc};

use anyhow::anyhow;
use chip_core::globals::{SCREEN_WIDTH, SCREEN_HEIGHT};
use log::error;
use softbuffer::{Context, SoftBufferError, Surface};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowBuilder},
};

use crate::emulator::{Control, Emulator};

const PIXEL_ON: u32 = 0x00FF_FFFF;
const PIXEL_OFF: u32 = 0x0000_0000;

/// Opens the window and runs the emulator until it is closed.
pub fn run(mut emulator: Emulator, scale: u32) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|e| anyhow!("could not create event loop: {}", e))?;
    let size = LogicalSize::new(
        (SCREEN_WIDTH as u32 * scale) as f64,
        (SCREEN_HEIGHT as u32 * scale) as f64,
    );
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("CHIP-8")
            .with_inner_size(size)
            .build(&event_loop)
            .map_err(|e| anyhow!("could not create window: {}", e))?
    );
    let context = Context::new(window.clone())
        .map_err(|e| anyhow!("could not create graphics context: {}", e))?;
    let mut surface = Surface::new(&context, window.clone())
        .map_err(|e| anyhow!("could not create surface: {}", e))?;

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput {
                    event: KeyEvent { physical_key: PhysicalKey::Code(code), state, repeat: false, .. },
                    ..
                } => {
                    if emulator.handle_key(code, state == ElementState::Pressed) == Control::Exit {
                        elwt.exit();
                    }
                },
                WindowEvent::RedrawRequested => {
                    if let Err(e) = present(&mut surface, &window, emulator.cpu().get_display_buffer()) {
                        error!("could not present frame: {}", e);
                        elwt.exit();
                    }
                },
                _ => (),
            },
            Event::AboutToWait => {
                if emulator.update() {
                    window.request_redraw();
                }
            },
            _ => (),
        }
    })
    .map_err(|e| anyhow!("event loop failed: {}", e))
}

/// Scales the 1-bit framebuffer to whatever size the window currently has.
fn present(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    window: &Window,
    pixels: &[u8],
) -> Result<(), SoftBufferError> {
    let size = window.inner_size();
    let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(width, height)?;
    let (w, h) = (width.get() as usize, height.get() as usize);
    let mut buffer = surface.buffer_mut()?;
    for dy in 0..h {
        let y = dy * SCREEN_HEIGHT / h;
        for dx in 0..w {
            let x = dx * SCREEN_WIDTH / w;
            buffer[dy * w + dx] = if pixels[x + y * SCREEN_WIDTH] != 0 { PIXEL_ON } else { PIXEL_OFF };
        }
    }
    buffer.present()
}

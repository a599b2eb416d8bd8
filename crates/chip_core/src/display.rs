use crate::globals::{SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_BUFFER_SIZE};

/// Monochrome framebuffer, one byte per pixel (0 or 1), addressed `x + y * SCREEN_WIDTH`.
pub struct Display {
    buffer: [u8; SCREEN_BUFFER_SIZE]
}
impl Display {
    pub fn new() -> Self {
        Display {
            buffer: [0; SCREEN_BUFFER_SIZE]
        }
    }
    pub fn clear(&mut self) {
        self.buffer = [0x0; SCREEN_BUFFER_SIZE];
    }
    #[cfg(test)]
    pub fn load(&mut self, data: &[u8; SCREEN_BUFFER_SIZE]) {
        self.buffer.copy_from_slice(data);
    }
    pub fn get_buffer(&self) -> &[u8; SCREEN_BUFFER_SIZE] {
        &self.buffer
    }
    /// XORs the sprite rows onto the screen and returns the collision flag.
    /// The origin wraps around the screen, pixels past the right or bottom
    /// edge are clipped.
    pub fn blit_sprite(&mut self, x: usize, y: usize, data: &[u8]) -> bool {
        let x = x % SCREEN_WIDTH;
        let y = y % SCREEN_HEIGHT;
        let mut collision = false;
        for (row, byte) in data.iter().enumerate() {
            collision |= self.blit_byte(x, y + row, *byte);
        }
        collision
    }
    /// returns a collision flag
    fn blit_byte(&mut self, x: usize, y: usize, data: u8) -> bool {
        if y >= SCREEN_HEIGHT { return false }
        let mut collision = false;
        for bit in 0..8 {
            let px = x + bit;
            if px >= SCREEN_WIDTH { break }
            if data & (0x80 >> bit) == 0 { continue }
            let pixel = &mut self.buffer[px + y * SCREEN_WIDTH];
            collision |= *pixel == 1;
            *pixel ^= 1;
        }
        collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(display: &Display, x: usize, y: usize) -> [u8; 8] {
        let start = x + y * SCREEN_WIDTH;
        let mut out = [0; 8];
        out.copy_from_slice(&display.buffer[start..start + 8]);
        out
    }

    #[test]
    fn blit_byte() {
        let mut display = Display::new();
        let flag = display.blit_byte(8, 0, 0b10101011);
        assert!(!flag);
        assert!(row(&display, 8, 0) == [1, 0, 1, 0, 1, 0, 1, 1]);
        assert!(display.buffer[7] == 0);
        assert!(display.buffer[16] == 0);
    }
    #[test]
    fn blit_byte_with_y() {
        let mut display = Display::new();
        let flag = display.blit_byte(8, 2, 0b10101011);
        assert!(!flag);
        assert!(row(&display, 8, 2) == [1, 0, 1, 0, 1, 0, 1, 1]);
        assert!(row(&display, 8, 1) == [0; 8]);
        assert!(row(&display, 8, 3) == [0; 8]);
    }
    #[test]
    fn blit_byte_non_empty() {
        let mut display = Display::new();
        display.buffer[8] = 1;
        display.buffer[9] = 1;
        let flag = display.blit_byte(8, 0, 0b10000000);
        assert!(flag);
        assert!(display.buffer[8] == 0);
        assert!(display.buffer[9] == 1);
    }
    #[test]
    fn blit_byte_unset_pixels_do_not_collide() {
        let mut display = Display::new();
        display.buffer[9] = 1;
        let flag = display.blit_byte(8, 0, 0b10000000);
        assert!(!flag);
        assert!(display.buffer[9] == 1);
    }
    #[test]
    fn blit_byte_clip_x() {
        let mut display = Display::new();
        let flag = display.blit_byte(60, 0, 0b11111111);
        assert!(!flag);
        assert!(display.buffer[60..64] == [1, 1, 1, 1]);
        // nothing wraps onto the next row
        assert!(display.buffer[64..68] == [0, 0, 0, 0]);
        assert!(display.buffer[0..4] == [0, 0, 0, 0]);
    }
    #[test]
    fn blit_byte_clip_x_ignores_collision_off_screen() {
        let mut display = Display::new();
        display.buffer[SCREEN_WIDTH] = 1;
        let flag = display.blit_byte(62, 0, 0b00111111);
        assert!(!flag);
        assert!(display.buffer[SCREEN_WIDTH] == 1);
    }
    #[test]
    fn blit_sprite_clip_y() {
        let mut display = Display::new();
        let flag = display.blit_sprite(0, SCREEN_HEIGHT - 1, &[0xFF, 0xFF, 0xFF]);
        assert!(!flag);
        assert!(row(&display, 0, SCREEN_HEIGHT - 1) == [1; 8]);
        assert!(row(&display, 0, 0) == [0; 8]);
    }
    #[test]
    fn blit_sprite_wraps_origin() {
        let mut display = Display::new();
        display.blit_sprite(SCREEN_WIDTH + 3, SCREEN_HEIGHT + 2, &[0b10000000]);
        assert!(display.buffer[3 + 2 * SCREEN_WIDTH] == 1);
    }
    #[test]
    fn blit_sprite_multi_line() {
        let mut display = Display::new();
        let sprite = [
            0b10101011,
            0b11101011,
            0b10111011,
        ];
        let flag = display.blit_sprite(8, 2, &sprite);
        assert!(!flag);
        assert!(row(&display, 8, 1) == [0; 8]);
        assert!(row(&display, 8, 2) == [1, 0, 1, 0, 1, 0, 1, 1]);
        assert!(row(&display, 8, 3) == [1, 1, 1, 0, 1, 0, 1, 1]);
        assert!(row(&display, 8, 4) == [1, 0, 1, 1, 1, 0, 1, 1]);
        assert!(row(&display, 8, 5) == [0; 8]);
    }
    #[test]
    fn blit_sprite_twice_erases() {
        let mut display = Display::new();
        let sprite = [0xF0, 0x90, 0xF0];
        assert!(!display.blit_sprite(10, 10, &sprite));
        assert!(display.blit_sprite(10, 10, &sprite));
        assert!(display.get_buffer().iter().all(|p| *p == 0));
    }
    #[test]
    fn clear() {
        let mut display = Display::new();
        display.load(&[1; SCREEN_BUFFER_SIZE]);
        display.clear();
        assert!(display.get_buffer() == &[0u8; SCREEN_BUFFER_SIZE]);
    }
}

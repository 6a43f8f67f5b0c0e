//! Built-in texture images, generated at compile time.

/// Texture unit carrying the ground checkerboard.
pub const CHECKERBOARD_UNIT: u8 = 0;

/// Texture unit carrying the sphere contour stripe.
pub const STRIPE_UNIT: u8 = 1;

/// An RGBA8 image baked into the binary.
#[derive(Debug, Clone, Copy)]
pub struct TextureImage {
    pub width: usize,
    pub height: usize,
    pub data: &'static [u8],
}

const CHECKERBOARD_SIZE: usize = 64;

/// 64x64 green/white checkerboard with 8-pixel cells, RGBA8.
const CHECKERBOARD_DATA: [u8; CHECKERBOARD_SIZE * CHECKERBOARD_SIZE * 4] = {
    let mut data = [0u8; CHECKERBOARD_SIZE * CHECKERBOARD_SIZE * 4];
    let mut i = 0;
    while i < CHECKERBOARD_SIZE {
        let mut j = 0;
        while j < CHECKERBOARD_SIZE {
            let white = ((i & 8) == 0) != ((j & 8) == 0);
            let base = (i * CHECKERBOARD_SIZE + j) * 4;
            if white {
                data[base] = 255;
                data[base + 1] = 255;
                data[base + 2] = 255;
            } else {
                data[base] = 0;
                data[base + 1] = 150;
                data[base + 2] = 0;
            }
            data[base + 3] = 255;
            j += 1;
        }
        i += 1;
    }
    data
};

const STRIPE_LEN: usize = 32;

/// 32x1 stripe, RGBA8: red for the first five texels, yellow after.
const STRIPE_DATA: [u8; STRIPE_LEN * 4] = {
    let mut data = [0u8; STRIPE_LEN * 4];
    let mut j = 0;
    while j < STRIPE_LEN {
        data[4 * j] = 255;
        data[4 * j + 1] = if j > 4 { 255 } else { 0 };
        data[4 * j + 2] = 0;
        data[4 * j + 3] = 255;
        j += 1;
    }
    data
};

pub const CHECKERBOARD_64: TextureImage = TextureImage {
    width: CHECKERBOARD_SIZE,
    height: CHECKERBOARD_SIZE,
    data: &CHECKERBOARD_DATA,
};

pub const STRIPE_32: TextureImage = TextureImage {
    width: STRIPE_LEN,
    height: 1,
    data: &STRIPE_DATA,
};

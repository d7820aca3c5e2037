//! Color palette for the dashboard
//!
//! RGB565: R 5 bits, G 6 bits, B 5 bits.
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Window background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Panel surface - slightly lighter than background
pub const COLOR_FOREGROUND: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Grid lines and placeholders
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Temperature series - muted red
pub const TEMPERATURE_COLOR: Rgb565 = Rgb565::new(220 >> 3, 90 >> 2, 80 >> 3);

/// Humidity series - soft blue
pub const HUMIDITY_COLOR: Rgb565 = Rgb565::new(90 >> 3, 150 >> 2, 230 >> 3);

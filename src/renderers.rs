use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};

use crate::cells::Position;
use crate::grid::Grid;
use crate::grid_displays::{CellAppearance, PathDisplay};

const START_COLOUR: Rgb<u8> = Rgb([0x22, 0xc5, 0x5e]);
const END_COLOUR: Rgb<u8> = Rgb([0xef, 0x44, 0x44]);
const PATH_COLOUR: Rgb<u8> = Rgb([0xfa, 0xcc, 0x15]);
const WALL_COLOUR: Rgb<u8> = Rgb([0x33, 0x41, 0x55]);
const OPEN_COLOUR: Rgb<u8> = Rgb([0xf1, 0xf5, 0xf9]);

#[derive(Debug)]
pub struct RenderOptions<'path> {
    cell_side_pixels_length: u8,
    path: Option<&'path [Position]>,
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                path: None,
            },
        }
    }

    /// Pixels along each side of one square cell. Zero is treated as one.
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> Self {
        self.options.cell_side_pixels_length = cell_side_pixels_length.max(1);
        self
    }

    pub fn path(mut self, path: Option<&'path [Position]>) -> Self {
        self.options.path = path;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Draw every cell as a filled square.
pub fn render_grid_image(grid: &Grid, options: &RenderOptions) -> RgbImage {
    let cell_pixels = options.cell_side_pixels_length as u32;
    let img_width = grid.width() as u32 * cell_pixels;
    let img_height = grid.height() as u32 * cell_pixels;
    let path_display = options.path.map(PathDisplay::new).unwrap_or_default();

    let mut img = RgbImage::from_pixel(img_width, img_height, WALL_COLOUR);
    for cell in grid.iter() {
        let colour = match path_display.appearance(cell) {
            CellAppearance::Start => START_COLOUR,
            CellAppearance::End => END_COLOUR,
            CellAppearance::OnPath => PATH_COLOUR,
            CellAppearance::Wall => WALL_COLOUR,
            CellAppearance::Open => OPEN_COLOUR,
        };

        let x1 = cell.position.x * cell_pixels;
        let y1 = cell.position.y * cell_pixels;
        for y in y1..(y1 + cell_pixels).min(img_height) {
            for x in x1..(x1 + cell_pixels).min(img_width) {
                img.put_pixel(x, y, colour);
            }
        }
    }
    img
}

/// Render and write the image. The format follows the file extension, only PNG is built in.
pub fn save_grid_image<P: AsRef<Path>>(grid: &Grid, options: &RenderOptions, file_path: P) -> ImageResult<()> {
    render_grid_image(grid, options).save(file_path)
}

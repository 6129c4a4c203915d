use liblife::Position;

pub const TOOLBAR_HEIGHT: u32 = 32;
pub const BUTTON_WIDTH: u32 = 64;
pub const BUTTON_MARGIN: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    StartStop,
    Randomize,
    Reset,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::StartStop, Button::Randomize, Button::Reset];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Button(Button),
    Cell(Position),
}

/// Maps between frame pixels and the toolbar/grid.
///
/// The toolbar takes a strip at the top. The board fills the rest with square-ish cells
/// sized by integer division, so a few pixels on the right and bottom may belong to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub board_width: usize,
    pub board_height: usize,
}

impl Layout {
    /// Window size that gives every cell `cell_size` pixels on a side.
    pub fn window_size_for(board_width: usize, board_height: usize, cell_size: u32) -> (u32, u32) {
        (
            board_width as u32 * cell_size,
            board_height as u32 * cell_size + TOOLBAR_HEIGHT,
        )
    }

    pub fn cell_size(&self) -> (u32, u32) {
        let grid_height = self.frame_height.saturating_sub(TOOLBAR_HEIGHT);

        (
            self.frame_width / self.board_width.max(1) as u32,
            grid_height / self.board_height.max(1) as u32,
        )
    }

    pub fn cell_rect(&self, pos: Position) -> Rect {
        let (cell_width, cell_height) = self.cell_size();

        Rect {
            x: pos.col as u32 * cell_width,
            y: TOOLBAR_HEIGHT + pos.row as u32 * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }

    pub fn button_rect(&self, button: Button) -> Rect {
        let slot = match button {
            Button::StartStop => 0,
            Button::Randomize => 1,
            Button::Reset => 2,
        };

        Rect {
            x: BUTTON_MARGIN + slot * (BUTTON_WIDTH + BUTTON_MARGIN),
            y: BUTTON_MARGIN,
            width: BUTTON_WIDTH,
            height: TOOLBAR_HEIGHT - BUTTON_MARGIN * 2,
        }
    }

    pub fn hit(&self, x: u32, y: u32) -> Option<Hit> {
        if y < TOOLBAR_HEIGHT {
            return Button::ALL
                .into_iter()
                .find(|button| self.button_rect(*button).contains(x, y))
                .map(Hit::Button);
        }

        let (cell_width, cell_height) = self.cell_size();
        if cell_width == 0 || cell_height == 0 {
            return None;
        }

        let pos = Position {
            row: ((y - TOOLBAR_HEIGHT) / cell_height) as usize,
            col: (x / cell_width) as usize,
        };

        (pos.row < self.board_height && pos.col < self.board_width).then_some(Hit::Cell(pos))
    }
}

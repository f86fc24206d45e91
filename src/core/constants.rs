/// Southern edge of the bounding region (degrees)
pub const MIN_LAT: f64 = 2.5;

/// Northern edge of the bounding region (degrees)
pub const MAX_LAT: f64 = 38.5;

/// Western edge of the bounding region (degrees)
pub const MIN_LON: f64 = 63.5;

/// Eastern edge of the bounding region (degrees)
pub const MAX_LON: f64 = 99.5;

/// Symbol grid, row 0 is the northernmost band and columns increase eastward
pub const DIGIPIN_GRID: [[char; 4]; 4] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

/// Rows and columns per subdivision
pub const GRID_SIZE: usize = 4;

/// Number of refinement levels per code
pub const LEVELS: usize = 10;

/// Symbols in a code, separators excluded
pub const CODE_LENGTH: usize = 10;

/// Separator used in the 3-3-4 rendering
pub const SEPARATOR: char = '-';

/// Levels after which a separator is written
pub const SEPARATOR_LEVELS: [usize; 2] = [3, 6];

/// Edge length of a level-10 cell in degrees (36 / 4^10)
pub const CELL_SIZE: f64 = (MAX_LAT - MIN_LAT) / 1_048_576.0;

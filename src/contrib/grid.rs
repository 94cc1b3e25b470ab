use rand::Rng;

use super::DayRecord;

pub const DAYS_PER_WEEK: usize = 7;
pub const MOCK_WEEKS: usize = 53;

const COLUMN_DELAY_SECS: f64 = 0.04;
const ROW_DELAY_SECS: f64 = 0.05;

/// One renderable cell. Synthetic cells carry no source day and no tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub level: u8,
    pub tooltip: Option<String>,
    pub delay_secs: f64,
    pub day: Option<DayRecord>,
}

impl Cell {
    /// Class tag consumed by the stylesheet: "level-0" through "level-4".
    pub fn level_class(&self) -> String {
        format!("level-{}", self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekColumn {
    pub cells: Vec<Cell>,
}

/// Column-major weekly layout. Rebuilt from scratch on every render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub columns: Vec<WeekColumn>,
}

impl Grid {
    /// Partition a chronological day sequence into columns of at most 7,
    /// purely by position. The final column keeps the remainder unpadded.
    pub fn from_days(days: &[DayRecord]) -> Self {
        let mut columns = Vec::with_capacity(days.len() / DAYS_PER_WEEK + 1);
        let mut current = WeekColumn::default();
        for day in days {
            let column = columns.len();
            let row = current.cells.len();
            current.cells.push(Cell {
                level: clamp_level(day.level),
                tooltip: Some(format!("{}: {} contributions", day.date, day.count)),
                delay_secs: reveal_delay(column, row),
                day: Some(day.clone()),
            });
            if current.cells.len() == DAYS_PER_WEEK {
                columns.push(std::mem::take(&mut current));
            }
        }
        if !current.cells.is_empty() {
            columns.push(current);
        }
        Grid { columns }
    }

    /// Plausible-looking stand-in grid: always 53 full columns of 7.
    pub fn synthetic<R: Rng>(rng: &mut R) -> Self {
        let mut columns = Vec::with_capacity(MOCK_WEEKS);
        for column in 0..MOCK_WEEKS {
            let mut cells = Vec::with_capacity(DAYS_PER_WEEK);
            for row in 0..DAYS_PER_WEEK {
                let r: f64 = rng.gen();
                cells.push(Cell {
                    level: level_for_draw(r),
                    tooltip: None,
                    delay_secs: reveal_delay(column, row),
                    day: None,
                });
            }
            columns.push(WeekColumn { cells });
        }
        Grid { columns }
    }

    pub fn cell_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).sum()
    }

    /// Source days in column order. For a grid built from real data this
    /// reproduces the input sequence exactly.
    pub fn days(&self) -> Vec<DayRecord> {
        self.columns
            .iter()
            .flat_map(|c| c.cells.iter())
            .filter_map(|cell| cell.day.clone())
            .collect()
    }
}

/// Diagonal reveal: columns lag by 0.04s each, rows within a column by 0.05s.
pub fn reveal_delay(column: usize, row: usize) -> f64 {
    column as f64 * COLUMN_DELAY_SECS + row as f64 * ROW_DELAY_SECS
}

/// A remote level is honored only inside 0..=4; anything else renders as 0.
pub fn clamp_level(level: i64) -> u8 {
    if (0..=4).contains(&level) {
        level as u8
    } else {
        0
    }
}

/// Threshold ladder over a uniform draw in [0,1). Comparisons run in
/// ascending order and each true comparison overwrites the last, so the
/// highest exceeded threshold wins. All inequalities are strict.
pub fn level_for_draw(r: f64) -> u8 {
    let mut level = 0;
    if r > 0.70 {
        level = 1;
    }
    if r > 0.85 {
        level = 2;
    }
    if r > 0.92 {
        level = 3;
    }
    if r > 0.97 {
        level = 4;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, count: u64, level: i64) -> DayRecord {
        DayRecord { date: date.to_string(), count, level }
    }

    fn sequence(n: usize) -> Vec<DayRecord> {
        (0..n).map(|i| day(&format!("d{}", i), i as u64, (i % 5) as i64)).collect()
    }

    #[test]
    fn chunks_into_full_columns_plus_remainder() {
        let grid = Grid::from_days(&sequence(10));
        assert_eq!(grid.columns.len(), 2);
        assert_eq!(grid.columns[0].cells.len(), 7);
        assert_eq!(grid.columns[1].cells.len(), 3);
    }

    #[test]
    fn full_year_is_53_by_7() {
        let grid = Grid::from_days(&sequence(371));
        assert_eq!(grid.columns.len(), 53);
        assert!(grid.columns.iter().all(|c| c.cells.len() == 7));
    }

    #[test]
    fn three_days_make_one_short_column() {
        let grid = Grid::from_days(&sequence(3));
        assert_eq!(grid.columns.len(), 1);
        assert_eq!(grid.columns[0].cells.len(), 3);
    }

    #[test]
    fn empty_input_makes_empty_grid() {
        let grid = Grid::from_days(&[]);
        assert!(grid.columns.is_empty());
        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn chunking_is_lossless_and_order_preserving() {
        for n in [1, 6, 7, 8, 14, 100, 365, 371] {
            let input = sequence(n);
            let grid = Grid::from_days(&input);
            assert_eq!(grid.days(), input, "round trip failed for n={}", n);
        }
    }

    #[test]
    fn tooltip_combines_date_and_count() {
        let grid = Grid::from_days(&[day("2024-01-01", 5, 1)]);
        assert_eq!(
            grid.columns[0].cells[0].tooltip.as_deref(),
            Some("2024-01-01: 5 contributions")
        );
    }

    #[test]
    fn reveal_delay_is_diagonal() {
        assert_eq!(reveal_delay(0, 0), 0.0);
        assert_eq!(reveal_delay(2, 3), 2.0 * 0.04 + 3.0 * 0.05);
        assert!((reveal_delay(2, 3) - 0.23).abs() < 1e-12);
        let grid = Grid::from_days(&sequence(371));
        assert_eq!(grid.columns[10].cells[4].delay_secs, 10.0 * 0.04 + 4.0 * 0.05);
    }

    #[test]
    fn out_of_range_levels_render_as_zero() {
        assert_eq!(clamp_level(-1), 0);
        assert_eq!(clamp_level(0), 0);
        assert_eq!(clamp_level(4), 4);
        assert_eq!(clamp_level(5), 0);
        assert_eq!(clamp_level(99), 0);
        let grid = Grid::from_days(&[day("2024-01-01", 3, 7)]);
        assert_eq!(grid.columns[0].cells[0].level, 0);
    }

    #[test]
    fn level_class_tags_are_exact() {
        for lvl in 0..=4i64 {
            let grid = Grid::from_days(&[day("2024-01-01", 1, lvl)]);
            assert_eq!(grid.columns[0].cells[0].level_class(), format!("level-{}", lvl));
        }
    }

    #[test]
    fn ladder_is_cumulative_at_boundaries() {
        assert_eq!(level_for_draw(0.0), 0);
        assert_eq!(level_for_draw(0.69), 0);
        assert_eq!(level_for_draw(0.70), 0);
        assert_eq!(level_for_draw(0.7000001), 1);
        assert_eq!(level_for_draw(0.85), 1);
        assert_eq!(level_for_draw(0.8500001), 2);
        assert_eq!(level_for_draw(0.92), 2);
        assert_eq!(level_for_draw(0.9200001), 3);
        assert_eq!(level_for_draw(0.97), 3);
        assert_eq!(level_for_draw(0.9700001), 4);
        assert_eq!(level_for_draw(0.9999999), 4);
    }

    #[test]
    fn ladder_is_monotonic_in_the_draw() {
        let draws = [0.0, 0.1, 0.3, 0.69, 0.71, 0.84, 0.86, 0.91, 0.93, 0.96, 0.98, 0.999];
        let mut prev = 0;
        for r in draws {
            let lvl = level_for_draw(r);
            assert!(lvl >= prev, "level dropped at r={}", r);
            prev = lvl;
        }
    }

    #[test]
    fn synthetic_grid_has_fixed_shape() {
        let mut rng = rand::thread_rng();
        let grid = Grid::synthetic(&mut rng);
        assert_eq!(grid.columns.len(), 53);
        assert!(grid.columns.iter().all(|c| c.cells.len() == 7));
        assert_eq!(grid.cell_count(), 371);
        for column in &grid.columns {
            for cell in &column.cells {
                assert!(cell.level <= 4);
                assert!(cell.tooltip.is_none());
                assert!(cell.day.is_none());
            }
        }
    }

    #[test]
    fn synthetic_levels_skew_quiet() {
        // Distributional check only: level 0 covers 70% of the draw space,
        // level 4 only 3%, so a full grid ordering the two the other way
        // around indicates a broken ladder.
        let mut rng = rand::thread_rng();
        let grid = Grid::synthetic(&mut rng);
        let mut counts = [0usize; 5];
        for column in &grid.columns {
            for cell in &column.cells {
                counts[cell.level as usize] += 1;
            }
        }
        assert!(counts[0] > counts[4]);
    }

    #[test]
    fn synthetic_delays_follow_the_same_formula() {
        let mut rng = rand::thread_rng();
        let grid = Grid::synthetic(&mut rng);
        assert_eq!(grid.columns[52].cells[6].delay_secs, 52.0 * 0.04 + 6.0 * 0.05);
        assert_eq!(grid.columns[0].cells[0].delay_secs, 0.0);
    }
}

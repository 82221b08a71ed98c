use sheetdiff::Table;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn table(rows: &[&[&str]]) -> Table {
    Table::from_rows(rows.iter().map(|row| row.iter().copied()))
}

pub fn key(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

use crate::error::Result;
use crate::models::CountryStat;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save table rows as CSV with header. `rank` is the 1-based position in `rows`.
pub fn save_table_csv<P: AsRef<Path>>(rows: &[CountryStat], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("rank","country","iso2","cases","today_cases","recovered","today_recovered","deaths","today_deaths","lat","long"))?;
    for (i, c) in rows.iter().enumerate() {
        wtr.serialize((
            i + 1,
            &c.country,
            c.iso2(),
            c.cases,
            c.today_cases,
            c.recovered,
            c.today_recovered,
            c.deaths,
            c.today_deaths,
            c.country_info.lat,
            c.country_info.long,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save table rows as a pretty JSON array in the API's own field naming.
pub fn save_table_json<P: AsRef<Path>>(rows: &[CountryStat], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

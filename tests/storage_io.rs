use covid_tracker::models::{CountryInfo, CountryStat};
use covid_tracker::normalize::sort_by_cases;
use covid_tracker::storage::{save_table_csv, save_table_json};
use tempfile::tempdir;

fn rows() -> Vec<CountryStat> {
    vec![
        CountryStat {
            country: "Germany".into(),
            country_info: CountryInfo {
                iso2: Some("DE".into()),
                lat: Some(51.0),
                long: Some(9.0),
                ..Default::default()
            },
            cases: Some(38_437_756),
            deaths: Some(174_979),
            ..Default::default()
        },
        CountryStat {
            country: "Diamond Princess".into(),
            cases: Some(712),
            ..Default::default()
        },
        CountryStat {
            country: "France".into(),
            country_info: CountryInfo {
                iso2: Some("FR".into()),
                ..Default::default()
            },
            cases: Some(40_138_560),
            ..Default::default()
        },
    ]
}

#[test]
fn csv_has_header_and_ranked_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let table = sort_by_cases(&rows());
    save_table_csv(&table, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "rank");
    assert_eq!(&headers[1], "country");
    assert_eq!(&headers[3], "cases");

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[0][1], "France");
    assert_eq!(&records[2][1], "Diamond Princess");
    // missing iso2 and counters are empty cells
    assert_eq!(&records[2][2], "");
    assert_eq!(&records[2][5], "");
}

#[test]
fn json_round_trips_api_field_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.json");
    let table = rows();
    save_table_json(&table, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"countryInfo\""));
    assert!(text.contains("\"todayCases\""));
    let back: Vec<CountryStat> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, table);
}

#[test]
fn empty_table_writes_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    save_table_csv(&[], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
}

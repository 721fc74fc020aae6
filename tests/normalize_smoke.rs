use latency_bars::core::load_table;
use latency_bars::normalize_cmd;
use tempfile::tempdir;

#[test]
fn normalize_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("output_ssd.csv");
    std::fs::write(
        &input,
        "datasize, write_duration_avg, write_duration_std_dev\n8, 1.5ms, 250µs\n16, 2ms, 1000µs\n",
    )
    .unwrap();
    let output = dir.path().join("out").join("ssd_ms.csv");

    normalize_cmd::run(input, Some(output.clone())).unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "datasize,write_duration_avg_ms,write_duration_std_dev_ms");
    assert_eq!(lines[1], "8,1.5,0.25");
    assert_eq!(lines[2], "16,2,1");
}

#[test]
fn normalized_output_reloads() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("output_hdd.csv");
    std::fs::write(
        &input,
        "datasize, write_duration_avg, write_duration_std_dev\n8, 12.345678ms, 987.654µs\n",
    )
    .unwrap();
    let output = dir.path().join("hdd_ms.csv");

    normalize_cmd::run(input.clone(), Some(output.clone())).unwrap();

    let original = load_table(&input).unwrap();
    let normalized = load_table(&output).unwrap();
    assert_eq!(normalized.rows, original.rows);

    // Normalizing twice changes nothing.
    let again = dir.path().join("hdd_ms_again.csv");
    normalize_cmd::run(output.clone(), Some(again.clone())).unwrap();
    assert_eq!(
        std::fs::read_to_string(&again).unwrap(),
        std::fs::read_to_string(&output).unwrap()
    );
}

#[test]
fn normalize_missing_input() {
    let dir = tempdir().unwrap();
    let err = normalize_cmd::run(dir.path().join("nope.csv"), None).unwrap_err();
    assert!(err.to_string().starts_with("file not found"));
}

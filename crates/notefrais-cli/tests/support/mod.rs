use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn new_command_with_temp_home() -> (Command, tempfile::TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let binary = assert_cmd::cargo::cargo_bin!("notefrais");
    let mut command = Command::new(binary);
    command.env("HOME", temp_home.path());
    command.env_remove("XDG_CONFIG_HOME");
    command.env_remove("XDG_DATA_HOME");
    (command, temp_home)
}

pub fn write_valid_session(home: &Path) {
    let config_dir = home.join(".config").join("notefrais");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("session.toml"),
        r#"
version = 1

[user]
email = "employee@test.tld"
role = "employee"
"#,
    )
    .expect("write session");
}

pub fn write_store_with_two_bills(home: &Path) {
    let data_dir = home.join(".local").join("share").join("notefrais");
    fs::create_dir_all(&data_dir).expect("create data dir");
    fs::write(
        data_dir.join("bills.toml"),
        r#"
version = 1

[[bill]]
id = "bill-0001"
status = "pending"
expense_type = "Transports"
name = "Vol Paris Londres"
amount = 348.0
date = "2021-03-13"
vat = "70"
pct = 20
email = "employee@test.tld"

[[bill]]
id = "bill-0002"
status = "accepted"
expense_type = "Restaurants et bars"
name = "Repas client"
amount = 58.0
date = "2022-05-02"
vat = "10"
pct = 20
file_url = "https://uploads.example/repas.jpg"
file_name = "repas.jpg"
email = "employee@test.tld"
"#,
    )
    .expect("write store");
}

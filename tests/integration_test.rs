use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str;
use std::sync::atomic::{AtomicU32, Ordering};

#[test]
fn insert_and_retrieve_row() {
    let input = Vec::from([
        "insert 1 user1 person1@example.com".to_owned(),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Executed.".to_owned(),
        "db > (1, user1, person1@example.com)".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn keeps_rows_sorted_by_id_regardless_of_insert_order() {
    let input = Vec::from([
        "insert 3 charlie charlie@example.com".to_owned(),
        "insert 1 alice alice@example.com".to_owned(),
        "insert 2 bob bob@example.com".to_owned(),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Executed.".to_owned(),
        "db > Executed.".to_owned(),
        "db > Executed.".to_owned(),
        "db > (1, alice, alice@example.com)".to_owned(),
        "(2, bob, bob@example.com)".to_owned(),
        "(3, charlie, charlie@example.com)".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn rejects_duplicate_keys() {
    let input = Vec::from([
        "insert 1 user1 person1@example.com".to_owned(),
        "insert 1 user1 person1@example.com".to_owned(),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Executed.".to_owned(),
        "db > Error: Duplicate key.".to_owned(),
        "db > (1, user1, person1@example.com)".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_fatal_diagnostic_when_a_non_root_leaf_would_need_to_split() {
    // 14 inserts fill and split the root leaf into two leaves under a new
    // internal root; a further 7 sequential inserts fill the right leaf,
    // whose split would require updating a non-root parent (unimplemented).
    let mut input: Vec<_> = (0..30)
        .map(|i| format!("insert {i} user{i} person{i}@example.com"))
        .collect();
    input.push(".exit".to_owned());

    let output = spawn_db(input);

    assert_eq!(
        output.last().map(String::as_str),
        Some("Need to implement updating parent after split")
    );
}

#[test]
fn allow_inserting_string_at_maximum_length() {
    let username = ['a'; 32].iter().collect::<String>();
    let email = ['a'; 255].iter().collect::<String>();
    let input = Vec::from([
        format!("insert 1 {username} {email}"),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Executed.".to_owned(),
        format!("db > (1, {username}, {email})"),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_error_message_if_strings_are_too_long() {
    let username = ['a'; 33].iter().collect::<String>();
    let email = ['a'; 255].iter().collect::<String>();
    let input = Vec::from([
        format!("insert 1 {username} {email}"),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > String is too long.".to_owned(),
        "db > ".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);

    let username = ['a'; 32].iter().collect::<String>();
    let email = ['a'; 256].iter().collect::<String>();
    let input = Vec::from([
        format!("insert 1 {username} {email}"),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > String is too long.".to_owned(),
        "db > ".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_error_message_if_id_is_negative() {
    let input = Vec::from([
        "insert -1 foo bar@email.com".to_owned(),
        "select".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > ID must be positive.".to_owned(),
        "db > ".to_owned(),
        "Executed.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_syntax_error_for_malformed_insert() {
    let input = Vec::from(["insert 1 only_one_column".to_owned(), ".exit".to_owned()]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Syntax error. Could not parse statement.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_unrecognized_command_message() {
    let input = Vec::from(["frobnicate".to_owned(), ".exit".to_owned()]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Unrecognized command 'frobnicate'.".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_constants() {
    let input = Vec::from([".constants".to_owned(), ".exit".to_owned()]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Constants:".to_owned(),
        "ROW_SIZE: 293".to_owned(),
        "COMMON_NODE_HEADER_SIZE: 6".to_owned(),
        "LEAF_NODE_HEADER_SIZE: 14".to_owned(),
        "LEAF_NODE_CELL_SIZE: 297".to_owned(),
        "LEAF_NODE_SPACE_FOR_CELLS: 4082".to_owned(),
        "LEAF_NODE_MAX_CELLS: 13".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn prints_one_node_btree() {
    let input = Vec::from([
        "insert 3 user3 person3@example.com".to_owned(),
        "insert 1 user1 person1@example.com".to_owned(),
        "insert 2 user2 person2@example.com".to_owned(),
        ".btree".to_owned(),
        ".exit".to_owned(),
    ]);

    let output = spawn_db(input);

    let expected_output = Vec::from([
        "db > Executed.".to_owned(),
        "db > Executed.".to_owned(),
        "db > Executed.".to_owned(),
        "db > Tree:".to_owned(),
        "- leaf (size 3)".to_owned(),
        "  - 1".to_owned(),
        "  - 2".to_owned(),
        "  - 3".to_owned(),
        "db > ".to_owned(),
    ]);

    assert_eq!(output, expected_output);
}

#[test]
fn persists_rows_across_reopen() {
    let db_path = test_db_path();
    let _ = std::fs::remove_file(&db_path);

    let first_run = spawn_db_at(
        &db_path,
        Vec::from([
            "insert 1 alice alice@example.com".to_owned(),
            ".exit".to_owned(),
        ]),
    );
    assert_eq!(
        first_run,
        Vec::from(["db > Executed.".to_owned(), "db > ".to_owned()])
    );

    let second_run = spawn_db_at(
        &db_path,
        Vec::from(["select".to_owned(), ".exit".to_owned()]),
    );

    let _ = std::fs::remove_file(&db_path);

    assert_eq!(
        second_run,
        Vec::from([
            "db > (1, alice, alice@example.com)".to_owned(),
            "Executed.".to_owned(),
            "db > ".to_owned(),
        ])
    );
}

#[test]
fn splits_root_leaf_into_two_leaves_of_seven() {
    let mut input: Vec<_> = (1..=14)
        .map(|i| format!("insert {i} user{i} person{i}@example.com"))
        .collect();
    input.push(".btree".to_owned());
    input.push(".exit".to_owned());

    let output = spawn_db(input);

    let mut expected: Vec<String> = (0..14).map(|_| "db > Executed.".to_owned()).collect();
    expected.push("db > Tree:".to_owned());
    expected.push("- internal (size 1)".to_owned());
    expected.push("  - leaf (size 7)".to_owned());
    for i in 1..=7 {
        expected.push(format!("    - {i}"));
    }
    expected.push("  - key 7".to_owned());
    expected.push("  - leaf (size 7)".to_owned());
    for i in 8..=14 {
        expected.push(format!("    - {i}"));
    }
    expected.push("db > ".to_owned());

    assert_eq!(output, expected);
}

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

fn test_db_path() -> std::path::PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    env::temp_dir().join(format!("btree-sqlite-test-{}-{id}.db", std::process::id()))
}

fn spawn_db(input: Vec<String>) -> Vec<String> {
    let db_path = test_db_path();
    let _ = std::fs::remove_file(&db_path);
    let output = spawn_db_at(&db_path, input);
    let _ = std::fs::remove_file(&db_path);
    output
}

fn spawn_db_at(db_path: &std::path::Path, input: Vec<String>) -> Vec<String> {
    let mut process = db_exe()
        .arg(db_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Unable to start the process.");

    let stdin = process
        .stdin
        .as_mut()
        .expect("Unable to pipe stdin to process.");

    let all_input = input
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>();
    // The process may exit early (e.g. the unimplemented-split diagnostic),
    // closing its end of the pipe before every line is consumed.
    let _ = stdin.write_all(all_input.as_bytes());

    let output = process
        .wait_with_output()
        .expect("Unable to get output from the process.");

    str::from_utf8(&output.stdout)
        .expect("Could not get process output.")
        .lines()
        .map(str::to_owned)
        .collect()
}

fn db_exe() -> Command {
    let target_dir = env::current_exe()
        .ok()
        .map(|mut path| {
            path.pop();
            if path.ends_with("deps") {
                path.pop();
            }
            path
        })
        .expect("this should only be used where a `current_exe` can be set");
    let db_exe = target_dir.join(format!("{}{}", "btree-sqlite", env::consts::EXE_SUFFIX));
    Command::new(db_exe)
}

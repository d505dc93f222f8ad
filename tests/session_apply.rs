use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

use edmv::config::Config;
use edmv::listing::listing_line;
use edmv::prompt::Prompter;
use edmv::reconcile::Session;

fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn touch(path: &Path, content: &str) {
    fs::write(path, content).expect("write fixture file");
}

/// Old = [a.txt, b.txt, c.txt], New = [a.txt, "", c2.txt]:
/// a.txt unchanged, b.txt deleted, c.txt renamed.
#[test]
fn keep_delete_rename_scenario() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    let c = td.path().join("c.txt");
    touch(&a, "a");
    touch(&b, "b");
    touch(&c, "c");

    let old = vec![listing_line(&a), listing_line(&b), listing_line(&c)];
    let new = vec![
        listing_line(&a),
        String::new(),
        listing_line(&td.path().join("c2.txt")),
    ];

    let session = Session::new(Config::default(), old).unwrap();
    // One delete confirmation expected.
    let mut p = prompter("y\n");
    let summary = session.apply(&mut p, &new).unwrap();

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.renamed, 1);
    assert!(a.exists());
    assert!(!b.exists());
    assert!(!c.exists());
    assert!(td.path().join("c2.txt").exists());
    assert_eq!(fs::read_to_string(td.path().join("c2.txt")).unwrap(), "c");
}

#[test]
fn apply_refuses_count_mismatch() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    touch(&a, "a");

    let old = vec![listing_line(&a)];
    let session = Session::new(Config::default(), old).unwrap();
    let mut p = prompter("");
    let err = session.apply(&mut p, &[]).unwrap_err();
    assert!(err.to_string().contains("refusing to apply"));
    assert!(a.exists(), "mismatched apply must not touch the filesystem");
}

#[test]
fn declined_delete_skips_and_continues() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    touch(&a, "a");
    touch(&b, "b");

    let old = vec![listing_line(&a), listing_line(&b)];
    let new = vec![String::new(), listing_line(&td.path().join("b2.txt"))];

    let session = Session::new(Config::default(), old).unwrap();
    let mut p = prompter("n\n");
    let summary = session.apply(&mut p, &new).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.renamed, 1);
    assert!(a.exists(), "declined delete must leave the file alone");
    assert!(td.path().join("b2.txt").exists());
}

#[test]
fn forced_delete_needs_no_prompt() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    touch(&a, "a");

    let cfg = Config {
        force: true,
        ..Config::default()
    };
    let session = Session::new(cfg, vec![listing_line(&a)]).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &[String::new()]).unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(!a.exists());
}

#[test]
fn rename_creates_missing_parent_directories() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    touch(&a, "payload");
    let dest = td.path().join("deep").join("nested").join("a.txt");

    let session = Session::new(Config::default(), vec![listing_line(&a)]).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &[listing_line(&dest)]).unwrap();

    assert_eq!(summary.renamed, 1);
    assert!(dest.is_file());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
}

#[test]
fn declined_overwrite_leaves_both_sides() {
    let td = tempdir().unwrap();
    let x = td.path().join("x.txt");
    let y = td.path().join("y.txt");
    touch(&x, "from-x");
    touch(&y, "original-y");

    let session = Session::new(Config::default(), vec![listing_line(&x)]).unwrap();
    let mut p = prompter("n\n");
    let summary = session.apply(&mut p, &[listing_line(&y)]).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(&x).unwrap(), "from-x");
    assert_eq!(fs::read_to_string(&y).unwrap(), "original-y");
}

#[test]
fn always_answer_covers_later_deletes() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    touch(&a, "a");
    touch(&b, "b");

    let old = vec![listing_line(&a), listing_line(&b)];
    let new = vec![String::new(), String::new()];

    let session = Session::new(Config::default(), old).unwrap();
    // Single "always"; the second delete must not read more input.
    let mut p = prompter("a\n");
    let summary = session.apply(&mut p, &new).unwrap();
    assert_eq!(summary.deleted, 2);
    assert!(!a.exists());
    assert!(!b.exists());
}

#[test]
fn quit_answer_stops_the_batch() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    touch(&a, "a");
    touch(&b, "b");

    let old = vec![listing_line(&a), listing_line(&b)];
    let new = vec![String::new(), String::new()];

    let session = Session::new(Config::default(), old).unwrap();
    let mut p = prompter("q\n");
    let err = session.apply(&mut p, &new).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<edmv::EdmvError>(),
        Some(edmv::EdmvError::Cancelled)
    ));
    assert!(a.exists());
    assert!(b.exists());
}

#[test]
fn non_empty_dir_delete_fails_but_batch_continues() {
    let td = tempdir().unwrap();
    let dir = td.path().join("full");
    fs::create_dir_all(&dir).unwrap();
    touch(&dir.join("inner.txt"), "x");
    let a = td.path().join("a.txt");
    touch(&a, "a");

    let cfg = Config {
        force: true,
        ..Config::default()
    };
    let old = vec![listing_line(&dir), listing_line(&a)];
    let new = vec![String::new(), listing_line(&td.path().join("a2.txt"))];

    let session = Session::new(cfg, old).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &new).unwrap();

    assert_eq!(summary.failed, 1, "non-recursive delete of a full dir fails");
    assert_eq!(summary.renamed, 1, "later pairs still run");
    assert!(dir.exists());
    assert!(td.path().join("a2.txt").exists());
}

#[test]
fn recursive_delete_removes_directory_tree() {
    let td = tempdir().unwrap();
    let dir = td.path().join("full");
    fs::create_dir_all(dir.join("sub")).unwrap();
    touch(&dir.join("sub").join("inner.txt"), "x");

    let cfg = Config {
        force: true,
        recursive: true,
        ..Config::default()
    };
    let session = Session::new(cfg, vec![listing_line(&dir)]).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &[String::new()]).unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(!dir.exists());
}

#[test]
fn empty_dir_delete_works_without_recursive() {
    let td = tempdir().unwrap();
    let dir = td.path().join("hollow");
    fs::create_dir_all(&dir).unwrap();

    let cfg = Config {
        force: true,
        ..Config::default()
    };
    let session = Session::new(cfg, vec![listing_line(&dir)]).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &[String::new()]).unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(!dir.exists());
}

#[cfg(unix)]
#[test]
fn recursive_delete_of_symlink_removes_only_the_link() {
    let td = tempdir().unwrap();
    let real = td.path().join("real");
    fs::create_dir_all(&real).unwrap();
    touch(&real.join("keep.txt"), "x");
    let link = td.path().join("alias");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let cfg = Config {
        force: true,
        recursive: true,
        ..Config::default()
    };
    let session = Session::new(cfg, vec![listing_line(&link)]).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &[String::new()]).unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(!link.exists());
    assert!(real.join("keep.txt").exists(), "target tree must survive");
}

#[test]
fn unchanged_pairs_touch_nothing() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    touch(&a, "a");
    // The path in the listing exists only as text; if Keep ever touched the
    // filesystem, a bogus second entry would surface as a failure.
    let ghost = listing_line(&td.path().join("never-created.txt"));

    let old = vec![listing_line(&a), ghost.clone()];
    let new = vec![listing_line(&a), ghost];

    let session = Session::new(Config::default(), old).unwrap();
    let mut p = prompter("");
    let summary = session.apply(&mut p, &new).unwrap();
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.failed, 0);
}

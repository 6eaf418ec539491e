use clap::Parser;
use osfmirror::engine::{
    Cli, child_url, containing_dir, matches_extension, relative_manifest_path, render_template,
};
use osfmirror::register::addurls_args;
use osfmirror::utils::{PackagePaths, apply_file_to_opts, parse_mirror_toml};
use osfmirror::{
    Column, HttpSource, ManifestColumns, MetadataSource, MirrorError, Opts, Subset,
    storage_root_url,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// --- Subset ---

#[test]
fn test_subset_parse_normalizes_slashes() {
    for raw in ["tpl-NKI/sub-01", "/tpl-NKI/sub-01", "tpl-NKI/sub-01/", "//tpl-NKI//sub-01"] {
        let s = Subset::parse(raw).unwrap();
        assert_eq!(s.segments(), ["tpl-NKI", "sub-01"], "{raw:?}");
        assert_eq!(s.prefix(), "/tpl-NKI/sub-01");
    }
}

#[test]
fn test_subset_parse_rejects_empty() {
    for raw in ["", "/", "///"] {
        assert!(matches!(
            Subset::parse(raw),
            Err(MirrorError::SubsetFormat(_))
        ));
    }
}

#[test]
fn test_subset_prefix_at_depth_is_bounded() {
    let s = Subset::parse("a/b/c").unwrap();
    assert_eq!(s.prefix_at_depth(0), "/a");
    assert_eq!(s.prefix_at_depth(1), "/a/b");
    assert_eq!(s.prefix_at_depth(2), "/a/b/c");
    assert_eq!(s.prefix_at_depth(7), "/a/b/c");
}

#[test]
fn test_subset_admits() {
    let s = Subset::parse("a/b").unwrap();
    assert!(s.admits("/a/", 0));
    assert!(s.admits("/a/zzz.txt", 0));
    assert!(!s.admits("/a/zzz.txt", 1));
    assert!(s.admits("/a/b/", 1));
    assert!(s.admits("/a/b/c/d.txt", 3));
    assert!(!s.admits("/x/", 0));
}

#[test]
fn test_subset_contains_requires_full_prefix() {
    let s = Subset::parse("a/b").unwrap();
    assert!(s.contains("/a/b/c.txt"));
    assert!(s.contains("/a/b"));
    assert!(!s.contains("/a.json"));
    assert!(!s.contains("/a/c.txt"));
}

// --- path tools ---

#[test]
fn test_relative_manifest_path_without_subset() {
    assert_eq!(relative_manifest_path("/a/b.txt", None), "a/b.txt");
    assert_eq!(relative_manifest_path("/b.txt", None), "b.txt");
}

#[test]
fn test_relative_manifest_path_with_subset() {
    let s = Subset::parse("tpl-NKI").unwrap();
    assert_eq!(
        relative_manifest_path("/tpl-NKI/sub-01/file.nii.gz", Some(&s)),
        "sub-01/file.nii.gz"
    );
    assert_eq!(relative_manifest_path("/tpl-NKI", Some(&s)), "");
    assert_eq!(relative_manifest_path("/tpl-NKI/", Some(&s)), "");
}

#[test]
fn test_relative_manifest_path_prefix_only_removed_at_start() {
    let s = Subset::parse("a").unwrap();
    assert_eq!(relative_manifest_path("/x/a/f.txt", Some(&s)), "x/a/f.txt");
}

#[test]
fn test_matches_extension() {
    assert!(matches_extension("f.nii.gz", None));
    assert!(matches_extension("f.nii.gz", Some(".nii.gz")));
    assert!(matches_extension("f.nii.gz", Some(".gz")));
    assert!(!matches_extension("f.nii.gz", Some(".nii")));
    assert!(!matches_extension("f.gz", Some(".nii.gz")));
}

#[test]
fn test_containing_dir() {
    assert_eq!(containing_dir("sub-01/anat/file.nii.gz"), "sub-01/anat");
    assert_eq!(containing_dir("file.nii.gz"), "");
    assert_eq!(containing_dir("sub-01/"), "sub-01/");
    assert_eq!(containing_dir(""), "");
}

#[test]
fn test_child_url_concatenates() {
    assert_eq!(child_url("https://h/root/", "/abc/"), "https://h/root//abc/");
}

#[test]
fn test_storage_root_url() {
    assert_eq!(
        storage_root_url("files.osf.io", "ue5gx"),
        "https://files.osf.io/v1/resources/ue5gx/providers/osfstorage/"
    );
}

#[test]
fn test_default_manifest_path() {
    let p = PackagePaths::get().default_manifest_path("ue5gx");
    assert_eq!(p, std::env::temp_dir().join("ue5gx_recursive.csv"));
}

// --- templates ---

#[test]
fn test_render_template() {
    let row: HashMap<&str, &str> = [("path", "a/b.txt"), ("url", "https://u")].into();
    assert_eq!(render_template("{path}", &row).unwrap(), "a/b.txt");
    assert_eq!(render_template("x/{path}", &row).unwrap(), "x/a/b.txt");
    assert_eq!(render_template("{{lit}}{url}", &row).unwrap(), "{lit}https://u");
    assert!(render_template("{missing}", &row).is_err());
    assert!(render_template("{path", &row).is_err());
}

// --- columns ---

#[test]
fn test_columns_default_header() {
    assert_eq!(
        ManifestColumns::default().header(),
        "name,url,location,sha256,path"
    );
}

#[test]
fn test_columns_from_names() {
    let cols = ManifestColumns::from_names(&["path", "name", "url", "location", "sha256"]).unwrap();
    assert_eq!(cols.iter().next(), Some(Column::Path));
    assert!(ManifestColumns::from_names(&["name", "url"]).is_err());
    assert!(
        ManifestColumns::from_names(&["name", "name", "url", "location", "sha256", "path"])
            .is_err()
    );
    assert!(ManifestColumns::from_names(&["name", "url", "location", "sha256", "size"]).is_err());
}

// --- registration ---

#[test]
fn test_addurls_args() {
    let args = addurls_args(Path::new("/tmp/k.csv"), "{url}", "{path}");
    assert_eq!(
        args,
        vec![
            "addurls",
            "--ifexists",
            "overwrite",
            "--meta",
            "location={location}",
            "--meta",
            "sha256={sha256}",
            "/tmp/k.csv",
            "{url}",
            "{path}"
        ]
    );
}

// --- config file + CLI ---

#[test]
fn test_toml_applies_present_fields_only() {
    let file = parse_mirror_toml(
        r#"
        [settings]
        subset = "tpl-NKI"
        ext = ".nii.gz"
        columns = ["path", "name", "url", "location", "sha256"]
        timeout_secs = 5
        "#,
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.subset.as_deref(), Some("tpl-NKI"));
    assert_eq!(opts.ext.as_deref(), Some(".nii.gz"));
    assert_eq!(opts.timeout_secs, 5);
    assert_eq!(opts.columns.header(), "path,name,url,location,sha256");
    assert_eq!(opts.api_host, "files.osf.io");
    assert_eq!(opts.filename_format, "{path}");
    assert!(!opts.prepare);
}

#[test]
fn test_toml_unknown_setting_is_error() {
    assert!(parse_mirror_toml("[settings]\nnot_a_setting = 1\n").is_err());
}

#[test]
fn test_toml_bad_columns_keep_default() {
    let file = parse_mirror_toml("[settings]\ncolumns = [\"name\"]\n").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.columns, ManifestColumns::default());
}

#[test]
fn test_cli_overrides_file() {
    let file = parse_mirror_toml("[settings]\next = \".txt\"\nprepare = true\n").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);

    let cli = Cli::try_parse_from([
        "osfmirror",
        "ue5gx",
        "--ext",
        ".nii.gz",
        "--csv",
        "/tmp/out.csv",
        "--columns",
        "path,name,url,location,sha256",
        "--prepare=false",
    ])
    .unwrap();
    cli.apply_to(&mut opts).unwrap();
    assert_eq!(opts.key, "ue5gx");
    assert_eq!(opts.ext.as_deref(), Some(".nii.gz"));
    assert_eq!(opts.csv, Some(PathBuf::from("/tmp/out.csv")));
    assert_eq!(opts.columns.header(), "path,name,url,location,sha256");
    assert!(!opts.prepare);
}

#[test]
fn test_cli_flag_without_value_is_true() {
    let cli = Cli::try_parse_from(["osfmirror", "ue5gx", "-r", "-v"]).unwrap();
    let mut opts = Opts::default();
    cli.apply_to(&mut opts).unwrap();
    assert!(opts.register);
    assert!(opts.verbose);
}

#[test]
fn test_cli_rejects_bad_columns() {
    let cli = Cli::try_parse_from(["osfmirror", "k", "--columns", "name,url"]).unwrap();
    assert!(cli.apply_to(&mut Opts::default()).is_err());
}

#[test]
fn test_run_rejects_empty_key() {
    let opts = Opts::default();
    assert!(osfmirror::engine::run(&opts, Path::new(".")).is_err());
}

// --- HTTP source ---

#[test]
fn test_http_source_connection_refused_is_remote_fetch() {
    let source = HttpSource::new(5).unwrap();
    let url = "http://127.0.0.1:1/v1/resources/k/providers/osfstorage/";
    match source.fetch(url) {
        Err(MirrorError::RemoteFetch { url: u, reason }) => {
            assert_eq!(u, url);
            assert!(reason.starts_with("connection error"), "{reason}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_http_source_invalid_url_is_remote_fetch() {
    let source = HttpSource::new(5).unwrap();
    match source.fetch("not a url") {
        Err(MirrorError::RemoteFetch { reason, .. }) => {
            assert!(reason.starts_with("HTTP error"), "{reason}")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

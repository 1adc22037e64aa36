//! End-to-end tests of the fsac binary.
//!
//! `tabulate` and `update` need no aligner, so they run against hand-written
//! result files. `call` runs against a shell script standing in for `blastn`.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONTIG: &str = "TTTTTTTTTTACGTACGTACGGATCCATGCGGGGGGGGGGCCCCCCCCCCAAAAAAAAAA";
const LOCUS: &str = "ACGTACGTACGGATCCATGC";

fn fsac() -> Command {
    Command::cargo_bin("fsac").unwrap()
}

/// A forward hit on contig_1 covering the first 15 of 20 locus bases
fn short_hit_json() -> String {
    format!(
        r#"{{
  "abcZ": {{
    "BlastResult": true,
    "Mismatches": 0,
    "QueryAln": "{aln}",
    "SubjAln": "{aln}",
    "Gaps": 0,
    "QueryName": "abcZ_1",
    "SubjName": "contig_1",
    "PercentIdentity": 100.0,
    "PercentLength": 0.75,
    "QueryLength": 20,
    "SubjectLength": 60,
    "AlignmentLength": 15,
    "SubjectStartIndex": 11,
    "SubjectEndIndex": 25,
    "QueryStartIndex": 1,
    "QueryEndIndex": 15,
    "BitScore": 30.0,
    "ReverseComplement": false,
    "IsContigTruncation": false,
    "MarkerMatch": null,
    "CorrectMarkerMatch": false
  }},
  "adk": {{
    "BlastResult": false
  }}
}}
"#,
        aln = &LOCUS[..15]
    )
}

fn exact_hit_json(locus: &str, allele: u32) -> String {
    format!(
        r#"{{
  "{locus}": {{
    "BlastResult": true,
    "Mismatches": 0,
    "QueryAln": "ACGT",
    "SubjAln": "ACGT",
    "Gaps": 0,
    "QueryName": "{locus}_{allele}",
    "SubjName": "contig_1",
    "PercentIdentity": 100.0,
    "PercentLength": 1.0,
    "QueryLength": 4,
    "SubjectLength": 60,
    "AlignmentLength": 4,
    "SubjectStartIndex": 11,
    "SubjectEndIndex": 14,
    "QueryStartIndex": 1,
    "QueryEndIndex": 4,
    "BitScore": 8.0,
    "ReverseComplement": false,
    "IsContigTruncation": false,
    "MarkerMatch": "{allele}",
    "CorrectMarkerMatch": true,
    "Partial": false
  }}
}}
"#
    )
}

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["alleles", "json", "genomes"] {
            std::fs::create_dir(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    fn path(&self, relative: &str) -> std::path::PathBuf {
        self.root.path().join(relative)
    }

    fn write(&self, relative: &str, content: &str) {
        std::fs::write(self.path(relative), content).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_tabulate_to_stdout() {
    let ws = Workspace::new();
    ws.write("json/SRR2.json", &exact_hit_json("aroC", 7));
    ws.write("json/SRR1.json", &short_hit_json());

    fsac()
        .args(["tabulate", "-j", arg(&ws.path("json"))])
        .assert()
        .success()
        .stdout("\tabcZ\tadk\taroC\nSRR1\t?\t0\t\nSRR2\t\t\t7\n");
}

#[test]
fn test_tabulate_to_file_with_delimiter() {
    let ws = Workspace::new();
    ws.write("json/SRR1.json", &exact_hit_json("aroC", 7));

    fsac()
        .args([
            "tabulate",
            "-j",
            arg(&ws.path("json")),
            "-o",
            arg(&ws.path("calls.csv")),
            "-d",
            ",",
        ])
        .assert()
        .success();

    assert_eq!(ws.read("calls.csv"), ",aroC\nSRR1,7\n");
}

#[test]
fn test_update_extends_and_appends() {
    let ws = Workspace::new();
    ws.write("alleles/abcZ.fasta", ">1\nAAAAAAAAAAAAAAAAAAAA\n>2\nCCCCCCCCCCCCCCCCCCCC");
    ws.write("alleles/adk.fasta", ">1\nGGGG\n");
    ws.write("json/SRR1.json", &short_hit_json());
    ws.write("genomes/SRR1.fasta", &format!(">contig_1 assembled\n{CONTIG}\n"));

    let update = || {
        fsac()
            .args([
                "update",
                "-a",
                arg(&ws.path("alleles")),
                "-j",
                arg(&ws.path("json")),
                "-g",
                arg(&ws.path("genomes")),
            ])
            .assert()
            .success();
    };

    update();
    let catalog = ws.read("alleles/abcZ.fasta");
    assert_eq!(
        catalog,
        format!(">1\nAAAAAAAAAAAAAAAAAAAA\n>2\nCCCCCCCCCCCCCCCCCCCC\n>3\n{LOCUS}\n")
    );

    let result = ws.read("json/SRR1.json");
    assert!(result.contains(r#""MarkerMatch": "3""#));
    assert!(result.contains(r#""CorrectMarkerMatch": true"#));

    // A second pass finds nothing left to resolve
    update();
    assert_eq!(ws.read("alleles/abcZ.fasta"), catalog);
    assert_eq!(ws.read("json/SRR1.json"), result);
}

#[test]
fn test_update_threshold_leaves_partial() {
    let ws = Workspace::new();
    ws.write("alleles/abcZ.fasta", ">1\nAAAA\n");
    ws.write("alleles/adk.fasta", ">1\nGGGG\n");
    ws.write("json/SRR1.json", &short_hit_json());
    ws.write("genomes/SRR1.fasta", &format!(">contig_1\n{CONTIG}\n"));

    fsac()
        .args([
            "update",
            "-a",
            arg(&ws.path("alleles")),
            "-j",
            arg(&ws.path("json")),
            "-g",
            arg(&ws.path("genomes")),
            "-t",
            "2",
        ])
        .assert()
        .success();

    assert_eq!(ws.read("alleles/abcZ.fasta"), ">1\nAAAA\n");
    assert!(ws.read("json/SRR1.json").contains(r#""Partial": true"#));
}

#[test]
fn test_validation_reports_every_problem() {
    let ws = Workspace::new();
    ws.write("json/SRR1.json", "{ not json");
    ws.write("json/SRR2.json", "[]");

    fsac()
        .args(["tabulate", "-j", arg(&ws.path("json"))])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 input problem(s)"))
        .stderr(predicate::str::contains("SRR1.json"))
        .stderr(predicate::str::contains("SRR2.json"));
}

#[test]
fn test_missing_directory_fails() {
    let ws = Workspace::new();

    fsac()
        .args(["tabulate", "-j", arg(&ws.path("nowhere"))])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_call_with_missing_aligner_fails() {
    let ws = Workspace::new();
    ws.write("alleles/abcZ.fasta", &format!(">1\n{LOCUS}\n"));
    ws.write("genomes/SRR1.fasta", &format!(">contig_1\n{CONTIG}\n"));

    fsac()
        .args([
            "call",
            "-i",
            arg(&ws.path("genomes/SRR1.fasta")),
            "-a",
            arg(&ws.path("alleles")),
            "--blastn",
            "/nonexistent/bin/blastn",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("abcZ"));

    assert!(!ws.path("json/SRR1.json").exists());
}

/// Stand-in for blastn that ignores its arguments and prints one exact hit
#[cfg(unix)]
fn fake_blastn(ws: &Workspace) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = ws.path("blastn");
    ws.write(
        "blastn",
        &format!(
            "#!/bin/sh\nprintf 'abcZ_1\\tcontig_1\\t100.000\\t20\\t1\\t20\\t11\\t30\\t20\\t60\\t40.1\\t0\\t{LOCUS}\\t{LOCUS}\\t0\\n'\n"
        ),
    );
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_call_writes_json_to_stdout() {
    let ws = Workspace::new();
    ws.write("alleles/abcZ.fasta", &format!(">1\n{LOCUS}\n"));
    ws.write("genomes/SRR1.fasta", &format!(">contig_1\n{CONTIG}\n"));
    let blastn = fake_blastn(&ws);

    fsac()
        .args([
            "call",
            "-i",
            arg(&ws.path("genomes/SRR1.fasta")),
            "-a",
            arg(&ws.path("alleles")),
            "--blastn",
            arg(&blastn),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"abcZ\": {\n"))
        .stdout(predicate::str::contains(r#""MarkerMatch": "1""#))
        .stdout(predicate::str::contains(r#""CorrectMarkerMatch": true"#))
        .stdout(predicate::str::contains(r#""SubjectStartIndex": 11"#));

    assert_eq!(ws.read("alleles/abcZ.fasta"), format!(">1\n{LOCUS}\n"));
}

#[cfg(unix)]
#[test]
fn test_call_then_tabulate() {
    let ws = Workspace::new();
    ws.write("alleles/abcZ.fasta", &format!(">1\n{LOCUS}\n"));
    ws.write("genomes/SRR1.fasta", &format!(">contig_1\n{CONTIG}\n"));
    let blastn = fake_blastn(&ws);

    fsac()
        .args([
            "call",
            "-i",
            arg(&ws.path("genomes/SRR1.fasta")),
            "-a",
            arg(&ws.path("alleles")),
            "-o",
            arg(&ws.path("json/SRR1.json")),
            "--blastn",
            arg(&blastn),
        ])
        .assert()
        .success();

    fsac()
        .args(["tabulate", "-j", arg(&ws.path("json"))])
        .assert()
        .success()
        .stdout("\tabcZ\nSRR1\t1\n");
}

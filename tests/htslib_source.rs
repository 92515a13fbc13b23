use rust_htslib::bam::{self, header::HeaderRecord, record::Cigar, record::CigarString};
use sex_check::classify::{PredictedSex, Thresholds};
use sex_check::config::RunSettings;
use sex_check::idxstats::{CoverageRecord, HtslibIdxstats, IdxstatsSource, IdxstatsTable};
use sex_check::label::DelimitedTokenConvention;
use sex_check::pipeline;
use sex_check::reference::ReferenceAliases;
use sex_check::score::ScoreMethod;
use sex_check::verdict::SexMatch;
use std::path::{Path, PathBuf};

const CHR1_READS: i64 = 7;
const CHRY_READS: i64 = 3;
const UNPLACED_READS: usize = 2;

fn mapped_record(tid: i32, pos: i64, name: &str) -> bam::Record {
    let mut record = bam::Record::new();
    let cigar = CigarString(vec![Cigar::Match(4)]);
    record.set(name.as_bytes(), Some(&cigar), b"ACGT", &[30, 30, 30, 30]);
    record.set_flags(0);
    record.set_tid(tid);
    record.set_pos(pos);
    record.set_mapq(60);
    record.set_mtid(-1);
    record.set_mpos(-1);
    record
}

fn unplaced_record(name: &str) -> bam::Record {
    let mut record = bam::Record::new();
    record.set(name.as_bytes(), None, b"ACGT", &[30, 30, 30, 30]);
    record.set_flags(0x4);
    record.set_tid(-1);
    record.set_pos(-1);
    record.set_mtid(-1);
    record.set_mpos(-1);
    record
}

/// Writes a coordinate-sorted BAM with 7 reads on chr1, 3 on chrY and two
/// unplaced unmapped reads.
fn write_bam(path: &Path) {
    let mut header = bam::Header::new();
    let mut hd = HeaderRecord::new(b"HD");
    hd.push_tag(b"VN", "1.6");
    hd.push_tag(b"SO", "coordinate");
    header.push_record(&hd);
    for (name, length) in [("chr1", 1000), ("chrY", 500)] {
        let mut sq = HeaderRecord::new(b"SQ");
        sq.push_tag(b"SN", name);
        sq.push_tag(b"LN", length);
        header.push_record(&sq);
    }

    let mut writer = bam::Writer::from_path(path, &header, bam::Format::Bam).expect("create BAM");
    for i in 0..CHR1_READS {
        writer
            .write(&mapped_record(0, 100 + i * 10, &format!("r1_{}", i)))
            .expect("write chr1 read");
    }
    for i in 0..CHRY_READS {
        writer
            .write(&mapped_record(1, 50 + i * 10, &format!("rY_{}", i)))
            .expect("write chrY read");
    }
    for i in 0..UNPLACED_READS {
        writer
            .write(&unplaced_record(&format!("ru_{}", i)))
            .expect("write unplaced read");
    }
}

fn expected_records() -> Vec<CoverageRecord> {
    vec![
        CoverageRecord {
            name: "chr1".to_string(),
            length: 1000,
            mapped: CHR1_READS as u64,
            unmapped: 0,
        },
        CoverageRecord {
            name: "chrY".to_string(),
            length: 500,
            mapped: CHRY_READS as u64,
            unmapped: 0,
        },
        CoverageRecord {
            name: "*".to_string(),
            length: 0,
            mapped: 0,
            unmapped: UNPLACED_READS as u64,
        },
    ]
}

fn settings() -> RunSettings {
    RunSettings {
        thresholds: Thresholds::new(0.01, 0.05).unwrap(),
        method: ScoreMethod::scaled_ratio(1000.0).unwrap(),
        references: ReferenceAliases::default(),
        convention: Box::new(DelimitedTokenConvention::default()),
    }
}

#[test]
fn htslib_index_statistics_match_samtools_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let bam_path: PathBuf = dir.path().join("S1_F.bam");
    write_bam(&bam_path);

    // Explicit index somewhere samtools would never look; no default index yet
    let index_dir = dir.path().join("indexes");
    std::fs::create_dir(&index_dir).unwrap();
    let custom_index: PathBuf = index_dir.join("custom.bai");
    bam::index::build(&bam_path, Some(&custom_index), bam::index::Type::Bai, 1)
        .expect("build custom index");

    let with_index = HtslibIdxstats
        .collect(&bam_path, Some(&custom_index))
        .expect("read stats through explicit index");
    let table = IdxstatsTable::parse(with_index.as_str()).expect("parse htslib output");
    assert_eq!(table.records(), expected_records().as_slice());
    assert_eq!(
        with_index,
        "chr1\t1000\t7\t0\nchrY\t500\t3\t0\n*\t0\t0\t2\n"
    );

    bam::index::build(&bam_path, None, bam::index::Type::Bai, 1).expect("build default index");
    let beside_bam = HtslibIdxstats
        .collect(&bam_path, None)
        .expect("read stats through default index");
    assert_eq!(beside_bam, with_index);
}

#[test]
fn htslib_statistics_feed_the_decision_chain() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let bam_path = dir.path().join("S1_F.bam");
    write_bam(&bam_path);
    bam::index::build(&bam_path, None, bam::index::Type::Bai, 1).expect("build index");

    let raw = HtslibIdxstats.collect(&bam_path, None).expect("read stats");
    let table = IdxstatsTable::parse(raw).expect("parse htslib output");
    let verdict = pipeline::evaluate(&table, "S1_F", &settings()).expect("verdict");

    assert_eq!(verdict.coverage.chr1_mapped, 7);
    assert_eq!(verdict.coverage.chry_mapped, 3);
    // 3 * 1000 / 7 is far above the female threshold
    assert_eq!(verdict.predicted_sex, PredictedSex::Female);
    assert_eq!(verdict.matched, SexMatch::Match);
}

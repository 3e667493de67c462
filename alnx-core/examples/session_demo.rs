//! AlnX Session Demo
//!
//! Aligns a reference against a query in both modes, then folds three
//! lines into one session and prints the identity and consensus rows.

use alnx_core::{AlignmentMode, AlignmentRunner, AlignmentSession, MultiAlgorithm, ScoringModel};

fn main() -> Result<(), alnx_core::AlignError> {
    println!("AlnX Session Demo");
    println!("=================\n");

    let reference = b"TTACGTACGTAA";
    let query = b"GGACGTTCGTCC";
    let runner = AlignmentRunner::new(ScoringModel::default());

    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let result = runner.run(reference, query, mode)?;
        println!("{:?} (score {}, {:.1}% identity)", mode, result.score, result.stats().identity);
        println!("  {}", result.aligned_seq1_str());
        println!("  {}", result.aligned_seq2_str());
        println!("  {}\n", result.op_string());
    }

    let mut session = AlignmentSession::new(MultiAlgorithm::NeedlemanWunsch, ScoringModel::default());
    session.add_line("guide", b"AAACCCTTT");
    session.add_line("short", b"AAACTTT");
    session.add_line("shifted", b"AACCCTTT");
    session.recalc()?;

    for line in session.lines() {
        println!("{:<10} {}", line.name, line.working_str());
    }
    if let Some(consensus) = session.consensus() {
        println!("{:<10} {}", "consensus", consensus.consensus_str());
    }
    println!("nucleotide: {}", session.is_nucleotide());

    Ok(())
}

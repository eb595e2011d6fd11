//! The palindrome system from the procedural-automata literature:
//! procedure F -> a | aFa | b | bFb | G | eps, procedure G -> c | cGc | F,
//! with initial call F.

use std::collections::HashMap;

use log::info;
use vpa_rs::alphabet::ProceduralAlphabet;
use vpa_rs::dfa::CompactDfa;
use vpa_rs::spa::StackSpa;
use vpa_rs::system::ProceduralSystem;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let spa = build_palindrome_spa();

    info!("Well-matched palindromes");
    check_word(&spa, "FR");
    check_word(&spa, "FaR");
    check_word(&spa, "FaFRaR");
    check_word(&spa, "FbFGcRRbR");

    info!("Well-matched but invalid words");
    check_word(&spa, "FaaR");
    check_word(&spa, "FaGaRaR");
    check_word(&spa, "");

    info!("Ill-matched/non-rooted words");
    check_word(&spa, "FFF");
    check_word(&spa, "RF");
    check_word(&spa, "aba");

    Ok(())
}

fn check_word(spa: &StackSpa<char, CompactDfa<char>>, input: &str) {
    let word: Vec<char> = input.chars().collect();
    let accepted = spa.accepts(&word);
    info!(
        "Word '{}' is {}accepted by the SPA",
        input,
        if accepted { "" } else { "not " }
    );
}

fn build_palindrome_spa() -> StackSpa<char, CompactDfa<char>> {
    let alphabet = ProceduralAlphabet::new(vec!['F', 'G'], vec!['a', 'b', 'c'], 'R');
    let symbols: Vec<char> = alphabet.procedural_symbols().cloned().collect();

    // F accepts {eps, a, b, G, aFa, bFb}.
    let mut f = CompactDfa::new(symbols.clone());
    let s0 = f.add_initial_state(true);
    let s1 = f.add_state(true);
    let s2 = f.add_state(true);
    let s3 = f.add_state(false);
    let s4 = f.add_state(false);
    let s5 = f.add_state(true);
    f.add_transition(s0, &'G', s5);
    f.add_transition(s0, &'a', s1);
    f.add_transition(s0, &'b', s2);
    f.add_transition(s1, &'F', s3);
    f.add_transition(s2, &'F', s4);
    f.add_transition(s3, &'a', s5);
    f.add_transition(s4, &'b', s5);

    // G accepts {c, F, cGc}.
    let mut g = CompactDfa::new(symbols);
    let t0 = g.add_initial_state(false);
    let t1 = g.add_state(true);
    let t2 = g.add_state(false);
    let t3 = g.add_state(true);
    g.add_transition(t0, &'F', t3);
    g.add_transition(t0, &'c', t1);
    g.add_transition(t1, &'G', t2);
    g.add_transition(t2, &'c', t3);

    let mut procedures = HashMap::new();
    procedures.insert('F', f);
    procedures.insert('G', g);
    StackSpa::new(alphabet, Some('F'), procedures)
}

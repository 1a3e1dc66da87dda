//! One writer per §6 output format: textual emission listing, CNF
//! re-emission with branching-variable encoding, and the incremental
//! assumption-style cube format. Each drains an emission stream into a
//! `Write` sink without buffering the whole run, matching the core
//! engine's own "nothing retained across calls" discipline (§5).
use std::io::Write;

use crate::{engine::Emission, problem::ProblemInput, Error};

fn variable_legend<'a>(problem: &'a ProblemInput, vertex: crate::graph::VertexIndex) -> &'a str {
    let index = problem
        .variables
        .iter()
        .position(|&v| v == vertex)
        .expect("emitted variable vertex must belong to the problem's variable set");
    &problem.variable_legends[index]
}

fn value_legend<'a>(problem: &'a ProblemInput, vertex: crate::graph::VertexIndex) -> &'a str {
    let index = problem
        .values
        .iter()
        .position(|&v| v == vertex)
        .expect("emitted value vertex must belong to the problem's value set");
    &problem.value_legends[index]
}

/// `[<|Aut|>] <var> -> <val>, <var> -> <val>, ...` one line per emission.
pub fn write_textual<W: Write>(
    problem: &ProblemInput,
    emissions: impl Iterator<Item = Emission>,
    writer: &mut W,
) -> Result<(), Error> {
    for emission in emissions {
        let pairs: Vec<String> = emission
            .vars
            .iter()
            .zip(emission.values.iter())
            .map(|(&var, &val)| {
                format!("{} -> {}", variable_legend(problem, var), value_legend(problem, val))
            })
            .collect();
        writeln!(writer, "[{}] {}", emission.aut, pairs.join(", "))?;
    }
    Ok(())
}

/// A signed CNF literal for an (assigned variable, assigned value) pair
/// in CNF mode, where the variable legend is the decimal CNF variable
/// number and the value legend is "false"/"true".
fn signed_literal(problem: &ProblemInput, var: crate::graph::VertexIndex, val: crate::graph::VertexIndex) -> i64 {
    let variable_number: i64 = variable_legend(problem, var)
        .parse()
        .expect("CNF-mode variable legends are decimal variable numbers");
    if value_legend(problem, val) == "true" {
        variable_number
    } else {
        -variable_number
    }
}

/// Re-emits the original CNF header and clauses, then appends one fresh
/// branching variable per emission with a 2-clause block encoding "the
/// branch variable implies this emission's assignment", followed by a
/// single closing clause disjoining every branch variable so the result
/// stays equisatisfiable with the original formula (§6 CNF re-emission,
/// §8 scenario 3).
pub fn write_cnf_reemission<W: Write>(
    problem: &ProblemInput,
    emissions: impl Iterator<Item = Emission>,
    writer: &mut W,
) -> Result<(), Error> {
    let cnf = problem
        .cnf
        .as_ref()
        .expect("CNF re-emission requires a problem parsed in CNF mode");

    let mut branch_clauses: Vec<Vec<i64>> = Vec::new();
    let mut branch_literals: Vec<i64> = Vec::new();
    let mut next_variable = cnf.num_variables as i64;

    for emission in emissions {
        next_variable += 1;
        let branch_var = next_variable;
        branch_literals.push(branch_var);

        for (&var, &val) in emission.vars.iter().zip(emission.values.iter()) {
            let literal = signed_literal(problem, var, val);
            branch_clauses.push(vec![-branch_var, literal]);
        }
    }

    let num_variables = next_variable as usize;
    let num_clauses = cnf.clauses.len() + branch_clauses.len() + 1;

    writeln!(writer, "p cnf {} {}", num_variables, num_clauses)?;
    for clause in &cnf.clauses {
        writeln!(writer, "{} 0", clause.iter().map(i64::to_string).collect::<Vec<_>>().join(" "))?;
    }
    for clause in &branch_clauses {
        writeln!(writer, "{} 0", clause.iter().map(i64::to_string).collect::<Vec<_>>().join(" "))?;
    }
    writeln!(writer, "{} 0", branch_literals.iter().map(i64::to_string).collect::<Vec<_>>().join(" "))?;

    Ok(())
}

/// `p inccnf` header (no counts) followed by one `a <literals> 0` line
/// per emission, for incremental assumption-based solving.
pub fn write_incremental_cubes<W: Write>(
    problem: &ProblemInput,
    emissions: impl Iterator<Item = Emission>,
    writer: &mut W,
) -> Result<(), Error> {
    writeln!(writer, "p inccnf")?;
    for emission in emissions {
        let literals: Vec<String> = emission
            .vars
            .iter()
            .zip(emission.values.iter())
            .map(|(&var, &val)| signed_literal(problem, var, val).to_string())
            .collect();
        writeln!(writer, "a {} 0", literals.join(" "))?;
    }
    Ok(())
}

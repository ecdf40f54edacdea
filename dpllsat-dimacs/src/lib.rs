//! DIMACS CNF parser and writer for the dpllsat solver.
//!
//! Supports a restricted DIMACS CNF subset: comment lines starting with (optionally indented)
//! `c`, a single `p cnf <vars> <clauses>` header, and exactly one clause per subsequent
//! non-comment line, terminated by a literal `0`. Clauses spanning multiple lines, as permitted
//! by full DIMACS, are not supported.

use std::{borrow::Borrow, io};

use dpllsat_formula::{CnfFormula, Lit, Var};

use anyhow::Error;
use thiserror::Error;

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {}: invalid header syntax: {}", line, header)]
    InvalidHeader { line: usize, header: String },
    #[error("line {}: literal index {} is outside of 1..={}", line, index, var_count)]
    VarIndexOutOfRange {
        line: usize,
        index: usize,
        var_count: usize,
    },
    #[error("line {}: expected a header before any clause", line)]
    MissingHeader { line: usize },
    #[error("line {}: invalid literal '{}'", line, token)]
    InvalidLiteral { line: usize, token: String },
    #[error("line {}: clause is not terminated by '0'", line)]
    UnterminatedClause { line: usize },
    #[error(
        "formula has {} variables while the header specifies {} variables",
        var_count,
        header_var_count
    )]
    VarCount {
        var_count: usize,
        header_var_count: usize,
    },
    #[error(
        "formula has {} clauses while the header specifies {} clauses",
        clause_count,
        header_clause_count
    )]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
}

/// Variable and clause count present in a DIMACS CNF header.
#[derive(Copy, Clone, Debug)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Parse a complete DIMACS CNF input into a [`CnfFormula`].
pub fn parse_dimacs(input: impl io::Read) -> Result<CnfFormula, Error> {
    use io::BufRead;

    let buffer = io::BufReader::new(input);

    let mut formula = CnfFormula::new();
    let mut header: Option<DimacsHeader> = None;
    let mut clause_count = 0usize;

    for (line_index, line) in buffer.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line?;
        let trimmed = line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(ParserError::InvalidHeader {
                    line: line_number,
                    header: trimmed.to_owned(),
                }
                .into());
            }
            header = Some(parse_header_line(line_number, trimmed)?);
            formula.set_var_count(header.unwrap().var_count);
            continue;
        }

        let header = header.ok_or(ParserError::MissingHeader { line: line_number })?;

        let clause = parse_clause_line(line_number, trimmed, header.var_count)?;
        formula.add_clause(clause);
        clause_count += 1;
    }

    if let Some(header) = header {
        let var_count = formula.var_count();
        if var_count != header.var_count {
            return Err(ParserError::VarCount {
                var_count,
                header_var_count: header.var_count,
            }
            .into());
        }

        if clause_count != header.clause_count {
            return Err(ParserError::ClauseCount {
                clause_count,
                header_clause_count: header.clause_count,
            }
            .into());
        }
    }

    Ok(formula)
}

fn parse_header_line(line: usize, header_line: &str) -> Result<DimacsHeader, ParserError> {
    let mut values = header_line.split_whitespace();

    if values.next() != Some("p") {
        return Err(ParserError::InvalidHeader {
            line,
            header: header_line.to_owned(),
        });
    }

    if values.next() != Some("cnf") {
        return Err(ParserError::InvalidHeader {
            line,
            header: header_line.to_owned(),
        });
    }

    let invalid = || ParserError::InvalidHeader {
        line,
        header: header_line.to_owned(),
    };

    let var_count: usize = values.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
    let clause_count: usize = values.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;

    if values.next().is_some() {
        return Err(invalid());
    }

    Ok(DimacsHeader {
        var_count,
        clause_count,
    })
}

fn parse_clause_line(line: usize, content: &str, var_count: usize) -> Result<Vec<Lit>, ParserError> {
    let mut clause = vec![];
    let mut terminated = false;

    for token in content.split_whitespace() {
        let number: isize = token.parse().map_err(|_| ParserError::InvalidLiteral {
            line,
            token: token.to_owned(),
        })?;

        if number == 0 {
            terminated = true;
            break;
        }

        let index = number.unsigned_abs();
        if index == 0 || index > var_count {
            return Err(ParserError::VarIndexOutOfRange {
                line,
                index,
                var_count,
            });
        }

        clause.push(Lit::from_var(Var::from_dimacs(index as isize), number > 0));
    }

    if !terminated {
        return Err(ParserError::UnterminatedClause { line });
    }

    Ok(clause)
}

/// Write a DIMACS CNF header.
///
/// Can be used with [`write_dimacs_clauses`] to implement incremental writing.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    writeln!(
        target,
        "p cnf {var_count} {clause_count}",
        var_count = header.var_count,
        clause_count = header.clause_count
    )
}

/// Write an iterator of clauses as headerless DIMACS CNF.
///
/// Can be used with [`write_dimacs_header`] to implement incremental writing.
pub fn write_dimacs_clauses(
    target: &mut impl io::Write,
    clauses: impl IntoIterator<Item = impl IntoIterator<Item = impl Borrow<Lit>>>,
) -> io::Result<()> {
    for clause in clauses.into_iter() {
        for lit in clause.into_iter() {
            itoa::write(&mut *target, lit.borrow().to_dimacs())?;
            target.write_all(b" ")?;
        }
        target.write_all(b"0\n")?;
    }
    Ok(())
}

/// Write a formula as DIMACS CNF.
///
/// Use [`write_dimacs_header`] and [`write_dimacs_clauses`] to implement incremental writing.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    write_dimacs_header(
        &mut *target,
        DimacsHeader {
            var_count: formula.var_count(),
            clause_count: formula.len(),
        },
    )?;
    write_dimacs_clauses(&mut *target, formula.iter())
}

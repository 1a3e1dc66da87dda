//! Parsers for the problem text formats of §6: CNF, symmetry graph,
//! variable/value/prefix declarations, composed by `parse_problem` into
//! one `ProblemInput`. Built in the combinator style of the teacher's
//! own `dre_parser`.
mod companion_graph;

use nom::{
    bytes::complete::tag,
    character::complete::{char, i64 as parse_i64, space0, space1, u32 as parse_u32},
    error::context,
    multi::separated_list1,
    sequence::{preceded, tuple},
};

use crate::{
    graph::{Colour, Graph, VertexIndex},
    problem::{Cnf, ProblemInput},
    Error,
};

pub use companion_graph::companion_graph;

pub type Input<'a> = &'a str;
pub type ParseError<'a> = nom::error::VerboseError<Input<'a>>;
pub type ParseResult<'a, O> = nom::IResult<Input<'a>, O, ParseError<'a>>;

fn parse_cnf_header(input: Input<'_>) -> ParseResult<'_, (usize, usize)> {
    let header = context(
        "CNF header",
        tuple((
            tag("p"),
            space1,
            tag("cnf"),
            space1,
            parse_u32,
            space1,
            parse_u32,
        )),
    );
    let (rest, (_, _, _, _, nv, _, nc)) = header(input)?;
    Ok((rest, (nv as usize, nc as usize)))
}

fn parse_clause(input: Input<'_>) -> ParseResult<'_, Vec<i64>> {
    let (rest, literals) = context(
        "CNF clause",
        separated_list1(space1, parse_i64),
    )(input)?;
    Ok((rest, literals))
}

fn parse_graph_header(input: Input<'_>) -> ParseResult<'_, (usize, usize)> {
    let header = context(
        "symmetry graph header",
        tuple((
            tag("p"),
            space1,
            tag("edge"),
            space1,
            parse_u32,
            space1,
            parse_u32,
        )),
    );
    let (rest, (_, _, _, _, n, _, m)) = header(input)?;
    Ok((rest, (n as usize, m as usize)))
}

fn parse_edge_line(input: Input<'_>) -> ParseResult<'_, (usize, usize)> {
    let line = context(
        "edge line",
        tuple((tag("e"), space1, parse_u32, space1, parse_u32)),
    );
    let (rest, (_, _, u, _, v)) = line(input)?;
    Ok((rest, (u as usize, v as usize)))
}

fn parse_colour_line(input: Input<'_>) -> ParseResult<'_, (usize, Colour)> {
    let line = context(
        "colour line",
        tuple((tag("c"), space1, parse_u32, space1, parse_u32)),
    );
    let (rest, (_, _, u, _, k)) = line(input)?;
    Ok((rest, (u as usize, k as Colour)))
}

fn parse_variable_header(input: Input<'_>) -> ParseResult<'_, usize> {
    let header = context("variable header", tuple((tag("p"), space1, tag("variable"), space1, parse_u32)));
    let (rest, (_, _, _, _, count)) = header(input)?;
    Ok((rest, count as usize))
}

fn parse_tag_token(input: Input<'_>) -> ParseResult<'_, &str> {
    nom::bytes::complete::is_not(" \t\r\n")(input)
}

fn parse_variable_line(input: Input<'_>) -> ParseResult<'_, (usize, String)> {
    let line = context(
        "variable declaration",
        tuple((tag("v"), space1, parse_u32, space1, parse_tag_token)),
    );
    let (rest, (_, _, i, _, legend)) = line(input)?;
    Ok((rest, (i as usize, legend.to_string())))
}

fn parse_value_header(input: Input<'_>) -> ParseResult<'_, usize> {
    let header = context("value header", tuple((tag("p"), space1, tag("value"), space1, parse_u32)));
    let (rest, (_, _, _, _, count)) = header(input)?;
    Ok((rest, count as usize))
}

fn parse_value_line(input: Input<'_>) -> ParseResult<'_, (usize, String)> {
    let line = context(
        "value declaration",
        tuple((tag("r"), space1, parse_u32, space1, parse_tag_token)),
    );
    let (rest, (_, _, i, _, legend)) = line(input)?;
    Ok((rest, (i as usize, legend.to_string())))
}

fn parse_prefix_header(input: Input<'_>) -> ParseResult<'_, (usize, usize, u64)> {
    let header = context(
        "prefix header",
        tuple((
            tag("p"),
            space1,
            tag("prefix"),
            space1,
            parse_u32,
            space1,
            parse_u32,
            space1,
            nom::character::complete::u64,
        )),
    );
    let (rest, (_, _, _, _, k, _, a, _, t)) = header(input)?;
    Ok((rest, (k as usize, a as usize, t)))
}

fn parse_prefix_assignment_line(input: Input<'_>) -> ParseResult<'_, usize> {
    let line = context(
        "prefix assignment",
        tuple((tag("a"), space1, parse_u32, space1, parse_u32)),
    );
    let (rest, (_, _, u, _, _w)) = line(input)?;
    Ok((rest, u as usize))
}

fn parse_prefix_fixed_line(input: Input<'_>) -> ParseResult<'_, usize> {
    let line = context("prefix fixed position", tuple((tag("f"), space1, parse_u32)))(input)?;
    let (rest, (_, _, u)) = line;
    Ok((rest, u as usize))
}

#[allow(dead_code)]
fn parse_comment(input: Input<'_>) -> ParseResult<'_, ()> {
    let (rest, _) = preceded(tuple((tag("c"), space0)), nom::combinator::rest)(input)?;
    Ok((rest, ()))
}

#[allow(dead_code)]
fn parse_minus(input: Input<'_>) -> ParseResult<'_, char> {
    char('-')(input)
}

#[derive(Default)]
struct GraphBuilder {
    header: Option<(usize, usize)>,
    edges_seen: usize,
    colours: Vec<Colour>,
    colours_seen: usize,
    graph: Option<Graph>,
}

/// Reads an entire problem file (§6's five record kinds, any order, any
/// subset present) into a [`ProblemInput`]. When no explicit symmetry
/// graph is supplied but a CNF is, builds the companion graph instead
/// (§9.1) so the rest of the pipeline never has to care which path
/// produced G₀.
pub fn parse_problem(input: &str) -> Result<ProblemInput, Error> {
    let mut cnf_header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i64>> = Vec::new();

    let mut graph_builder = GraphBuilder::default();

    let mut variable_count: Option<usize> = None;
    let mut variables: Vec<(usize, String)> = Vec::new();

    let mut value_count: Option<usize> = None;
    let mut values: Vec<(usize, String)> = Vec::new();

    let mut prefix_header: Option<(usize, usize, u64)> = None;
    let mut prefix_vertices: Vec<usize> = Vec::new();

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((n, m)) = graph_builder.header {
            if graph_builder.edges_seen < m {
                let (_, (u, v)) = parse_edge_line(line)?;
                let graph = graph_builder.graph.get_or_insert_with(|| Graph::new_ordered(n));
                graph.add_edge((u - 1) as VertexIndex, (v - 1) as VertexIndex)?;
                graph_builder.edges_seen += 1;
                continue;
            }
            if graph_builder.colours_seen < n {
                let (_, (u, k)) = parse_colour_line(line)?;
                graph_builder.colours[u - 1] = k;
                graph_builder.colours_seen += 1;
                continue;
            }
        }

        if let Some(count) = variable_count {
            if variables.len() < count {
                let (_, entry) = parse_variable_line(line)?;
                variables.push(entry);
                continue;
            }
        }

        if let Some(count) = value_count {
            if values.len() < count {
                let (_, entry) = parse_value_line(line)?;
                values.push(entry);
                continue;
            }
        }

        if let Some((k, a, _)) = prefix_header {
            if prefix_vertices.len() < a {
                let (_, u) = parse_prefix_assignment_line(line)?;
                prefix_vertices.push(u);
                continue;
            }
            if prefix_vertices.len() < k {
                let (_, u) = parse_prefix_fixed_line(line)?;
                prefix_vertices.push(u);
                continue;
            }
        }

        if line.starts_with('c') {
            continue; // plain comment, outside any graph colour block
        }

        if let Ok((_, (nv, nc))) = parse_cnf_header(line) {
            cnf_header = Some((nv, nc));
            continue;
        }
        if let Ok((_, (n, m))) = parse_graph_header(line) {
            graph_builder.header = Some((n, m));
            graph_builder.colours = vec![crate::graph::DEFAULT_COLOR; n];
            continue;
        }
        if let Ok((_, count)) = parse_variable_header(line) {
            variable_count = Some(count);
            continue;
        }
        if let Ok((_, count)) = parse_value_header(line) {
            value_count = Some(count);
            continue;
        }
        if let Ok((_, header)) = parse_prefix_header(line) {
            prefix_header = Some(header);
            continue;
        }

        // Otherwise it must be a CNF clause line.
        if let Some((nv, _)) = cnf_header {
            let (_, mut literals) = parse_clause(line)?;
            if literals.last() == Some(&0) {
                literals.pop();
            }
            for &literal in &literals {
                if literal == 0 || literal.unsigned_abs() as usize > nv {
                    return Err(Error::LiteralOutOfRange(literal, nv));
                }
            }
            clauses.push(literals);
            continue;
        }

        return Err(Error::ParseError(vec![nom::error::VerboseErrorKind::Context(
            "unrecognized or out-of-order record",
        )]));
    }

    let had_explicit_graph_header = graph_builder.header.is_some();

    if let Some((n, _)) = graph_builder.header {
        if let Some(graph) = graph_builder.graph.as_mut() {
            graph.set_colours(&graph_builder.colours)?;
        } else if n == 0 {
            // Degenerate but well-formed: a symmetry graph on zero vertices.
            graph_builder.graph = Some(Graph::new_ordered(0));
        }
    }

    let cnf = cnf_header.map(|(num_variables, _)| Cnf {
        num_variables,
        clauses,
    });

    let (graph, problem_variables, variable_legends, problem_values, value_legends) =
        if let Some(graph) = graph_builder.graph.take() {
            let problem_variables: Vec<VertexIndex> = variables
                .iter()
                .map(|(i, _)| (*i - 1) as VertexIndex)
                .collect();
            let variable_legends = variables.into_iter().map(|(_, tag)| tag).collect();
            let raw_values: Vec<VertexIndex> =
                values.iter().map(|(i, _)| (*i - 1) as VertexIndex).collect();
            let raw_value_legends = values.into_iter().map(|(_, tag)| tag).collect();
            let (problem_values, value_legends) = normalize_value_legends(raw_values, raw_value_legends);
            (graph, problem_variables, variable_legends, problem_values, value_legends)
        } else if let Some(cnf) = &cnf {
            companion_graph(cnf)
        } else {
            return Err(Error::ParseError(vec![nom::error::VerboseErrorKind::Context(
                "neither a symmetry graph nor a CNF was supplied",
            )]));
        };

    let initial_prefix = prefix_vertices
        .into_iter()
        .map(|u| (u - 1) as VertexIndex)
        .collect();

    Ok(ProblemInput {
        graph,
        variables: problem_variables,
        variable_legends,
        values: problem_values,
        value_legends,
        initial_prefix,
        cnf,
        explicit_graph: had_explicit_graph_header,
    })
}

/// In CNF mode the tags "false"/"true" must both appear; the value
/// vertices are normalized to (false, true) order together with their
/// legends, regardless of declaration order, so `values[i]` and
/// `value_legends[i]` always name the same vertex.
fn normalize_value_legends(
    mut values: Vec<VertexIndex>,
    mut legends: Vec<String>,
) -> (Vec<VertexIndex>, Vec<String>) {
    if legends.len() == 2 && legends.contains(&"false".to_string()) && legends.contains(&"true".to_string())
        && legends[0] != "false"
    {
        legends.swap(0, 1);
        values.swap(0, 1);
    }
    (values, legends)
}

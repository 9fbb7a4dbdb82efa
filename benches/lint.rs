#[macro_use]
extern crate bencher;

use bencher::Bencher;
use std::fmt::Write;

fn graphql_sdl_parse(bench: &mut Bencher) {
    use graphql_schema_lint::schema::*;
    bench.iter(|| {
        let ctx = SchemaContext::new();
        Schema::parse(&ctx, SCHEMA).ok();
    });
}

fn graphql_sdl_parse_generated(bench: &mut Bencher) {
    use graphql_schema_lint::schema::*;
    let source = generated_schema(200);
    bench.iter(|| {
        let ctx = SchemaContext::new();
        Schema::parse(&ctx, &source).ok();
    });
}

fn graphql_lint(bench: &mut Bencher) {
    use graphql_schema_lint::{lint::Linter, schema::*};
    let ctx = SchemaContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let linter = Linter::with_default_rules();
    bench.iter(|| linter.lint(schema));
}

fn graphql_lint_generated(bench: &mut Bencher) {
    use graphql_schema_lint::{lint::Linter, schema::*};
    let source = generated_schema(200);
    let ctx = SchemaContext::new();
    let schema = Schema::parse(&ctx, &source).unwrap();
    let linter = Linter::with_default_rules();
    bench.iter(|| linter.lint(schema));
}

fn graphql_lint_sources(bench: &mut Bencher) {
    use graphql_schema_lint::lint::Linter;
    let sources: Vec<(String, String)> = (0..32)
        .map(|index| (format!("schema_{}.graphql", index), generated_schema(50)))
        .collect();
    let linter = Linter::with_default_rules();
    bench.iter(|| linter.lint_sources(&sources));
}

/// Generates a schema with `count` entities, each with a key, a connection and an edge type.
fn generated_schema(count: usize) -> String {
    let mut out = String::from(
        "interface Node { id: ID! }\n\
         type PageInfo { hasPreviousPage: Boolean! hasNextPage: Boolean! startCursor: String endCursor: String }\n\
         type Query {\n",
    );
    for index in 0..count {
        writeln!(out, "  entities{0}(first: Int, after: String): Entity{0}Connection!", index).ok();
    }
    out.push_str("}\n");
    for index in 0..count {
        writeln!(
            out,
            "\"\"\"\nEntity number {0}\n\"\"\"\n\
             type Entity{0} implements Node @key(fields: \"id\") {{ id: ID! name: String next: Entity{1} }}\n\
             type Entity{0}Connection {{ edges: [Entity{0}Edge!]! pageInfo: PageInfo! }}\n\
             type Entity{0}Edge {{ node: Entity{0}! cursor: String! }}",
            index,
            (index + 1) % count
        )
        .ok();
    }
    out
}

benchmark_group!(
    lint,
    graphql_sdl_parse,
    graphql_sdl_parse_generated,
    graphql_lint,
    graphql_lint_generated,
    graphql_lint_sources
);

benchmark_main!(lint);

static SCHEMA: &str = include_str!("../fixture/schema.graphql");

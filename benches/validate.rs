#[macro_use]
extern crate bencher;

use bencher::Bencher;

fn graphql_ast_parse(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Document::parse(&ctx, QUERY).ok();
    });
}

fn graphql_schema_parse(bench: &mut Bencher) {
    use graphql_validate::ast::ASTContext;
    use graphql_validate::schema::Schema;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Schema::parse_sdl(&ctx, SCHEMA).ok();
    });
}

fn graphql_validate_document(bench: &mut Bencher) {
    use graphql_validate::ast::*;
    use graphql_validate::schema::Schema;
    use graphql_validate::validate::validate;

    let ctx = ASTContext::new();
    let schema = Schema::parse_sdl(&ctx, SCHEMA).unwrap();
    let document = Document::parse(&ctx, QUERY).unwrap();
    bench.iter(|| validate(&ctx, schema, document).unwrap());
}

benchmark_group!(
    benches,
    graphql_ast_parse,
    graphql_schema_parse,
    graphql_validate_document
);

benchmark_main!(benches);

static SCHEMA: &str = r#"
type Query {
  node(id: ID!): Node
  me: User
  search(filter: Filter, limit: Int = 10): [Named!]
}

interface Node { id: ID! }
interface Named { name: String }

type User implements Node & Named {
  id: ID!
  name: String
  friends(limit: Int): [User!]
  pets: [Pet!]
}

type Dog implements Node & Named { id: ID! name: String barkVolume: Int }
type Cat implements Node & Named { id: ID! name: String meowVolume: Int }
union Pet = Dog | Cat

input Filter { kind: String name: String }
"#;

static QUERY: &str = r#"
query Profile($id: ID!, $withFriends: Boolean!) {
  node(id: $id) {
    id
    ... on User {
      name
      friends(limit: 5) @include(if: $withFriends) {
        id
        name
      }
      pets {
        __typename
        ... on Dog { barkVolume }
        ... on Cat { meowVolume }
        ...PetName
      }
    }
  }
  me {
    id
    name
  }
}

fragment PetName on Named {
  name
}
"#;

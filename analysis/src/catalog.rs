use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// placeholder for the target table inside a query template, it is never substituted
pub const TABLE_PLACEHOLDER: &str = "{TABLE}";
/// description used for variants the catalog doesn't know
pub const UNKNOWN_DESCRIPTION: &str = "Unknown query";

/// Documentation for a single benchmarked query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub description: &'static str,
    /// table and index narrative
    pub narrative: &'static str,
    /// query text as run by the benchmark, with [`TABLE_PLACEHOLDER`]
    pub template: &'static str,
    /// representative parameter bound to `$1`
    pub parameter: &'static str,
}

type CategoryMap = BTreeMap<&'static str, CatalogEntry>;

// the `{rows}` token in narratives is left as is, like the template placeholder
static CATALOG: Lazy<BTreeMap<&'static str, CategoryMap>> = Lazy::new(|| {
    let exact = CategoryMap::from([
        (
            "eql_cast",
            CatalogEntry {
                description: "Exact match using EQL cast operator",
                narrative: "Table: `string_encrypted_{rows}` with encrypted string values. \
                     Index: UNIQUE index on the encrypted value column.",
                template: "SELECT value FROM {TABLE} WHERE value = $1 LIMIT 1",
                parameter: "Bob Johnson",
            },
        ),
        (
            "eql_hash",
            CatalogEntry {
                description: "Exact match using EQL HMAC-256 hash function",
                narrative: "Table: `string_encrypted_{rows}` with encrypted string values. \
                     Index: Hash-based unique index using `eql_v2.hmac_256`.",
                template: "SELECT value FROM {TABLE} WHERE eql_v2.hmac_256(value) = eql_v2.hmac_256($1::jsonb) LIMIT 1",
                parameter: "Bob Johnson",
            },
        ),
    ]);

    let match_ = CategoryMap::from([
        (
            "eql_cast_firstname",
            CatalogEntry {
                description: "Pattern matching on first name using EQL cast and LIKE",
                narrative: "Table: `string_encrypted_{rows}` with encrypted string values. \
                     Index: MATCH index for substring searches. Query returns LIMIT 10 results.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value LIKE $1 LIMIT 10",
                parameter: "Bob",
            },
        ),
        (
            "eql_cast_lastname",
            CatalogEntry {
                description: "Pattern matching on last name using EQL cast and LIKE",
                narrative: "Table: `string_encrypted_{rows}` with encrypted string values. \
                     Index: MATCH index for substring searches. Query returns LIMIT 10 results.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value LIKE $1 LIMIT 10",
                parameter: "Johnson",
            },
        ),
        (
            "eql_bloom",
            CatalogEntry {
                description: "Pattern matching using EQL bloom filter containment",
                narrative: "Table: `string_encrypted_{rows}` with encrypted string values. \
                     Index: Bloom filter index using `eql_v2.bloom_filter`. Query returns LIMIT 10 results.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE eql_v2.bloom_filter(value) @> eql_v2.bloom_filter($1) LIMIT 10",
                parameter: "Johnson",
            },
        ),
    ]);

    let ore = CategoryMap::from([
        (
            "exact",
            CatalogEntry {
                description: "Exact match query on encrypted integer",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query returns LIMIT 1 result.",
                template: "SELECT value FROM {TABLE} WHERE value = $1 LIMIT 1",
                parameter: "5000",
            },
        ),
        (
            "range_gt_10",
            CatalogEntry {
                description: "Range query (greater than) returning 10 results",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query: WHERE value > 5000 LIMIT 10.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value > $1 LIMIT 10",
                parameter: "5000",
            },
        ),
        (
            "range_gt_100",
            CatalogEntry {
                description: "Range query (greater than) returning 100 results",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query: WHERE value > 5000 LIMIT 100.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value > $1 LIMIT 100",
                parameter: "5000",
            },
        ),
        (
            "range_lt_10",
            CatalogEntry {
                description: "Range query (less than) returning 10 results",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query: WHERE value < 5000 LIMIT 10.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value < $1 LIMIT 10",
                parameter: "5000",
            },
        ),
        (
            "range_lt_100",
            CatalogEntry {
                description: "Range query (less than) returning 100 results",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query: WHERE value < 5000 LIMIT 100.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value < $1 LIMIT 100",
                parameter: "5000",
            },
        ),
        (
            "range_lt_ordered_10",
            CatalogEntry {
                description: "Ordered range query (less than) with ORDER BY",
                narrative: "Table: `integer_encrypted_{rows}` with ORE-encrypted integer values. \
                     Index: ORE index supporting equality and range queries. \
                     Query: WHERE value < 5000 ORDER BY value LIMIT 10.",
                template: "SELECT id,value::jsonb FROM {TABLE} WHERE value < $1 ORDER BY value LIMIT 10",
                parameter: "5000",
            },
        ),
    ]);

    BTreeMap::from([("EXACT", exact), ("MATCH", match_), ("ORE", ore)])
});

/// look up the documentation for a query variant
pub fn lookup(category: &str, variant: &str) -> Option<&'static CatalogEntry> {
    CATALOG.get(category)?.get(variant)
}

/// name of the table a benchmark of `category` ran against for `row_count` rows
pub fn table_name(category: &str, row_count: u64) -> Option<String> {
    match category {
        "EXACT" | "MATCH" => Some(format!("string_encrypted_{row_count}")),
        "ORE" => Some(format!("integer_encrypted_{row_count}")),
        _ => None,
    }
}

/// Constants module to avoid magic numbers in the codebase

// Recommendation
pub const MAX_RECOMMENDATIONS: usize = 3;

// Cost estimation
pub const CHARS_PER_TOKEN: usize = 4;
pub const SUMMARY_OUTPUT_RATIO: f64 = 0.25;
pub const UNITS_PER_MILLION: f64 = 1_000_000.0;

// Scoring points
pub const TIER_POINTS_TOP: u32 = 3;
pub const TIER_POINTS_MID: u32 = 2;
pub const TIER_POINTS_LOW: u32 = 1;
pub const PRIMARY_TAG_POINTS: u32 = 2;
pub const SECONDARY_TAG_POINTS: u32 = 1;
pub const BALANCE_BONUS_POINTS: u32 = 1;

// Configuration
pub const APP_NAME: &str = "morningpod";
pub const ENV_PREFIX: &str = "MORNINGPOD_";
pub const LOCAL_CONFIG_PATH: &str = ".morningpod/config.toml";
pub const DEFAULT_SCRIPTS_FILE: &str = ".morningpod/scripts.json";

// Project manifests
pub const PACKAGE_JSON: &str = "package.json";
pub const TSCONFIG_JSON: &str = "tsconfig.json";
pub const PRISMA_SCHEMA: &str = "prisma/schema.prisma";

// Lockfiles in detection order
pub const LOCKFILES: &[(&str, &str)] = &[
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("bun.lockb", "bun"),
    ("bun.lock", "bun"),
    ("package-lock.json", "npm"),
];

pub const DOCKER_FILES: &[&str] = &[
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

// Dependency markers
pub const DATABASE_PACKAGES: &[&str] = &[
    "prisma",
    "@prisma/client",
    "drizzle-orm",
    "mongoose",
    "pg",
    "mysql2",
    "better-sqlite3",
    "typeorm",
    "sequelize",
    "knex",
];

pub const TESTING_PACKAGES: &[&str] = &[
    "vitest",
    "jest",
    "@playwright/test",
    "mocha",
    "cypress",
];

pub const LINTING_PACKAGES: &[&str] = &["eslint", "@biomejs/biome", "prettier"];

// Executables reported by `status`
pub const PACKAGE_MANAGER_BINARIES: &[&str] = &["npm", "yarn", "pnpm", "bun"];

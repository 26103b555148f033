pub const SCHEMA: &str = "
-- Core prompts table
CREATE TABLE IF NOT EXISTS prompts (
    id SERIAL PRIMARY KEY,                          -- Surrogate key
    title TEXT NOT NULL,                            -- Display title
    prompt TEXT NOT NULL,                           -- The prompt text
    is_favorite BOOLEAN DEFAULT FALSE,              -- Starred by the user
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP, -- Server-assigned
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP  -- Bumped on edit/favorite
);

-- Tables created before favorites existed
ALTER TABLE prompts ADD COLUMN IF NOT EXISTS is_favorite BOOLEAN DEFAULT FALSE;

-- Listing order
CREATE INDEX IF NOT EXISTS idx_prompts_listing ON prompts(is_favorite DESC, updated_at DESC);
";

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod batch_crawl_test;
mod fetch_gateway_test;
mod helpers;
mod pattern_reuse_test;

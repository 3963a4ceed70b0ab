//! Unit tests for ingester module

#[cfg(test)]
mod tests {
    use super::super::*;

    const RESULTS_FEED: &str = "Time,Result
08:24,LEV 0-2 HSV
08:27,BAY 3-1 DOR

08:30,FCA 1-1 HDH
";

    const ODDS_FEED: &str = "Time,Event,1,X,2,Goals,Over,Under
05:36,FCA - HDH,2.51,3.46,2.93,2.5,2.32,1.64
05:39,LEV - HSV,1.80,3.90,4.20,3.5,2.10,1.72
";

    #[test]
    fn test_parse_results_sample_line() {
        let results = parse_results("08:24,LEV 0-2 HSV");
        assert_eq!(results.len(), 1);

        let r = &results[0];
        assert_eq!(r.time, "08:24");
        assert_eq!(r.home_team, "LEV");
        assert_eq!(r.away_team, "HSV");
        assert_eq!(r.home_goals, 0);
        assert_eq!(r.away_goals, 2);
        assert_eq!(r.total_goals, 2);
        assert!(r.over15);
        assert!(!r.over25);
    }

    #[test]
    fn test_parse_results_feed_with_header_and_blank_lines() {
        let results = parse_results(RESULTS_FEED);
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].home_team, "BAY");
        assert_eq!(results[1].total_goals, 4);
        assert!(results[1].over25);
        assert_eq!(results[2].away_team, "HDH");
    }

    #[test]
    fn test_parse_results_is_idempotent() {
        assert_eq!(parse_results(RESULTS_FEED), parse_results(RESULTS_FEED));
    }

    #[test]
    fn test_parse_results_invariants_hold() {
        let feed = "1,A 0-0 B\n2,A 1-0 B\n3,A 1-1 B\n4,A 2-1 B\n5,A 10-7 B";
        let results = parse_results(feed);
        assert_eq!(results.len(), 5);
        for r in &results {
            assert_eq!(r.total_goals, r.home_goals + r.away_goals);
            assert_eq!(r.over15, r.total_goals >= 2);
            assert_eq!(r.over25, r.total_goals >= 3);
        }
    }

    #[test]
    fn test_malformed_line_does_not_affect_following_lines() {
        let results = parse_results("bad\n08:24,LEV 0-2 HSV");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].home_team, "LEV");
    }

    #[test]
    fn test_header_skipped_mid_batch() {
        let feed = "08:24,LEV 0-2 HSV\nTIME,RESULT\n08:27,BAY 3-1 DOR";
        assert_eq!(parse_results(feed).len(), 2);

        let odds = "05:36,FCA - HDH,2.51,3.46,2.93,2.5,2.32,1.64\ntime,event,1,x,2,g,o,u";
        assert_eq!(parse_odds(odds).len(), 1);
    }

    #[test]
    fn test_data_line_mentioning_header_words_is_dropped() {
        // Team names containing both keywords trip the header heuristic.
        let results = parse_results("08:24,TIME 1-0 RESULTS");
        assert!(results.is_empty());
    }

    #[test]
    fn test_first_score_match_wins() {
        let r = parse_result_line("08:24,U19-2 3-1 HSV").unwrap();
        assert_eq!(r.home_team, "U");
        assert_eq!(r.home_goals, 19);
        assert_eq!(r.away_goals, 2);
        assert_eq!(r.away_team, "3-1 HSV");
    }

    #[test]
    fn test_multi_digit_score() {
        let r = parse_result_line("21:00,AJX 12-10 PSV").unwrap();
        assert_eq!(r.home_goals, 12);
        assert_eq!(r.away_goals, 10);
        assert_eq!(r.total_goals, 22);
    }

    #[test]
    fn test_extra_commas_stay_in_match_text() {
        let r = parse_result_line("08:24,Leverkusen, GER 0-2 HSV").unwrap();
        assert_eq!(r.home_team, "Leverkusen, GER");
        assert_eq!(r.away_team, "HSV");
    }

    #[test]
    fn test_result_line_errors() {
        assert_eq!(
            parse_result_line("no comma here 1-0"),
            Err(LineError::MissingFields { expected: 2, found: 1 })
        );
        assert_eq!(
            parse_result_line("08:24,LEV v HSV"),
            Err(LineError::MissingScore)
        );
        assert_eq!(parse_result_line("08:24,0-2 HSV"), Err(LineError::EmptyTeam));
        assert_eq!(parse_result_line("08:24,LEV 0-2"), Err(LineError::EmptyTeam));
        assert!(matches!(
            parse_result_line("08:24,LEV 99999999999-2 HSV"),
            Err(LineError::GoalsOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_results_empty_input() {
        assert!(parse_results("").is_empty());
        assert!(parse_results("\n\n   \n").is_empty());
        assert!(parse_results("Time,Result").is_empty());
    }

    #[test]
    fn test_parse_odds_sample_line() {
        let odds = parse_odds("05:36,FCA - HDH,2.51,3.46,2.93,2.5,2.32,1.64");
        assert_eq!(odds.len(), 1);

        let o = &odds[0];
        assert_eq!(o.time, "05:36");
        assert_eq!(o.home_team, "FCA");
        assert_eq!(o.away_team, "HDH");
        assert_eq!(o.odd1, 2.51);
        assert_eq!(o.odd_x, 3.46);
        assert_eq!(o.odd2, 2.93);
        assert_eq!(o.goal_line, 2.5);
        assert_eq!(o.over_odd, 2.32);
        assert_eq!(o.under_odd, 1.64);
    }

    #[test]
    fn test_parse_odds_feed_with_header() {
        let odds = parse_odds(ODDS_FEED);
        assert_eq!(odds.len(), 2);
        assert_eq!(odds[1].home_team, "LEV");
        assert_eq!(odds[1].goal_line, 3.5);
    }

    #[test]
    fn test_parse_odds_ignores_extra_fields() {
        let odds = parse_odds("05:36, FCA - HDH ,2.51,3.46,2.93,2.5,2.32,1.64,extra,junk");
        assert_eq!(odds.len(), 1);
        assert_eq!(odds[0].home_team, "FCA");
        assert_eq!(odds[0].under_odd, 1.64);
    }

    #[test]
    fn test_parse_odds_hyphenated_name_truncates() {
        let o = parse_odd_line("05:36,Saint-Etienne - Lyon,2.1,3.2,3.4,2.5,1.9,1.9").unwrap();
        assert_eq!(o.home_team, "Saint");
        assert_eq!(o.away_team, "Etienne");
    }

    #[test]
    fn test_parse_odds_line_is_all_or_nothing() {
        let feed = "05:36,FCA - HDH,2.51,abc,2.93,2.5,2.32,1.64\n05:39,LEV - HSV,1.80,3.90,4.20,3.5,2.10,1.72";
        let odds = parse_odds(feed);
        assert_eq!(odds.len(), 1);
        assert_eq!(odds[0].home_team, "LEV");
    }

    #[test]
    fn test_odd_line_errors() {
        assert_eq!(
            parse_odd_line("05:36,FCA - HDH,2.51,3.46"),
            Err(LineError::MissingFields { expected: 8, found: 4 })
        );
        assert_eq!(
            parse_odd_line("05:36,FCA v HDH,2.51,3.46,2.93,2.5,2.32,1.64"),
            Err(LineError::InvalidEvent("FCA v HDH".to_string()))
        );
        assert_eq!(
            parse_odd_line("05:36,FCA - HDH,2.51,3.46,2.93,,2.32,1.64"),
            Err(LineError::InvalidNumber {
                field: "goals",
                value: String::new()
            })
        );
        assert!(matches!(
            parse_odd_line("05:36,FCA - HDH,2.51,3.46,2.93,2.5,inf,1.64"),
            Err(LineError::InvalidNumber { field: "over", .. })
        ));
    }

    #[test]
    fn test_parse_odds_empty_input() {
        assert!(parse_odds("").is_empty());
        assert!(parse_odds("garbage\nmore garbage").is_empty());
    }
}

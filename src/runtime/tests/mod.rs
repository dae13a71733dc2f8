mod display_case;
